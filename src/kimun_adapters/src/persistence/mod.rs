pub mod firebase_otp_store;
pub mod hashmap_otp_store;
pub mod redis_otp_store;

pub use firebase_otp_store::FirebaseOtpStore;
pub use hashmap_otp_store::HashMapOtpStore;
pub use redis_otp_store::RedisOtpStore;
