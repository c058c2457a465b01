pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::DEFAULT_ISSUER;
pub use codec::SignedToken;
pub use codec::TokenCodec;
pub use errors::JwtError;
