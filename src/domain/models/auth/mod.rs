pub mod authenticated_account;
pub mod login_result;

pub use authenticated_account::AuthenticatedAccount;
pub use login_result::LoginResult;
