//! Shared fixtures: a mock server on a random port and randomized accounts.

use accounts_client::{AccountAttributes, AccountData, AccountsClient, ClientConfig};
use fake::faker::currency::en::CurrencyCode;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::distr::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

const COUNTRIES: [&str; 5] = ["GB", "AU", "CA", "DE", "PT"];

/// Start the mock server on a random port and return its base URL.
pub fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> AccountsClient {
    AccountsClient::new(ClientConfig::new(base_url).unwrap())
}

fn upper_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// A well-formed account with a fresh id and randomized attributes.
pub fn fake_account() -> AccountData {
    let mut rng = rand::rng();
    let attributes = AccountAttributes {
        country: Some(COUNTRIES[rng.random_range(0..COUNTRIES.len())].to_string()),
        base_currency: Some(CurrencyCode().fake()),
        bank_id: Some(rng.random_range(100_000..1_000_000).to_string()),
        bank_id_code: Some(upper_alphanumeric(5)),
        bic: Some(format!("{}{}", upper_alphanumeric(6), rng.random_range(10..100))),
        name: Some(vec![Name().fake()]),
        alternative_names: Some(vec![Name().fake()]),
        account_classification: Some("Personal".to_string()),
        joint_account: Some(false),
        account_matching_opt_out: Some(false),
        secondary_identification: Some(upper_alphanumeric(10)),
        ..Default::default()
    };

    AccountData::new(
        &Uuid::new_v4().to_string(),
        &Uuid::new_v4().to_string(),
        attributes,
    )
}
