use kimun_adapters::{
    config::test,
    email::MockEmailClient,
    http::routes::ErrorResponse,
    persistence::HashMapOtpStore,
};
use kimun_core::{
    Clock, Email, ManualClock, OTP_LENGTH, OtpCode, OtpPolicy, OtpRecord, OtpStore, RecordKey,
};
use kimun_service::OtpService;
use secrecy::Secret;
use serde::Serialize;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub otp_store: HashMapOtpStore,
    pub email_client: MockEmailClient,
    pub clock: ManualClock,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_email_client(MockEmailClient::new()).await
    }

    pub async fn with_email_client(email_client: MockEmailClient) -> Self {
        let otp_store = HashMapOtpStore::new();
        let clock = ManualClock::default();

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = OtpService::new(
            otp_store.clone(),
            email_client.clone(),
            clock.clone(),
            OtpPolicy::default(),
        );
        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            otp_store,
            email_client,
            clock,
        }
    }

    pub async fn get_health(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/health", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_send_otp<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: Serialize + ?Sized,
    {
        self.http_client
            .post(format!("{}/api/send-otp", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_verify_otp<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: Serialize + ?Sized,
    {
        self.http_client
            .post(format!("{}/api/verify-otp", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw(&self, route: &str, body: &'static str) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, route))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn verify(&self, email: &str, otp: &str) -> reqwest::Response {
        self.post_verify_otp(&serde_json::json!({ "email": email, "otp": otp }))
            .await
    }

    /// Issues a code through the API and returns it as read from the email.
    pub async fn issue(&self, email: &str) -> String {
        let response = self
            .post_send_otp(&serde_json::json!({ "email": email }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        self.last_code_for(email).await
    }

    pub async fn last_code_for(&self, email: &str) -> String {
        let sent = self
            .email_client
            .last_sent_to(email)
            .await
            .expect("an OTP email was sent");
        code_in(&sent.text_body)
    }

    pub async fn stored_record(&self, email: &str) -> Option<OtpRecord> {
        self.otp_store
            .get(&key_for(email))
            .await
            .expect("in-memory store never fails")
            .map(|versioned| versioned.value)
    }

    /// Stores a record directly, bypassing issuance.
    pub async fn seed_record(&self, email: &str, otp: &str) {
        let record = OtpRecord::issue(
            OtpCode::parse(otp.to_string()).unwrap(),
            self.clock.now(),
            &OtpPolicy::default(),
        );
        self.otp_store.put(&key_for(email), &record).await.unwrap();
    }
}

pub fn key_for(email: &str) -> RecordKey {
    RecordKey::for_email(&Email::try_from(Secret::new(email.to_string())).unwrap())
}

pub fn code_in(text_body: &str) -> String {
    text_body
        .split(|c: char| !c.is_ascii_digit())
        .find(|digits| digits.len() == OTP_LENGTH)
        .expect("email carries a six digit code")
        .to_string()
}

pub async fn error_message(response: reqwest::Response) -> String {
    response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialize response body to ErrorResponse")
        .error
}
