pub mod env {
    pub const ENV_PREFIX: &str = "KIMUN";
    pub const ENV_SEPARATOR: &str = "__";
}

/// Optional JSON settings file, resolved relative to the working directory.
pub const CONFIG_FILE: &str = "config/base.json";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@kimun.in";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
    pub mod store {
        pub const BACKEND: &str = "firebase";
        pub const REDIS_HOST_NAME: &str = "127.0.0.1";
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
