mod health;
mod helpers;
mod send_otp;
mod verify_otp;
