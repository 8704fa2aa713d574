pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::login;

pub mod verify_otp;
pub use self::verify_otp::verify_otp;

mod state;
pub mod types;

pub use state::AuthState;
