use jsonwebtoken::crypto;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Compact JWS codec for access tokens.
///
/// Tokens are `base64url(header) "." base64url(payload) "." base64url(mac)`
/// where the MAC is HMAC-SHA512 keyed with the shared secret. Parsing and
/// signature verification are separate steps so that callers can decide what
/// an expired or forged token means for them.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// A structurally valid token whose signature has not been checked yet.
#[derive(Debug, Clone)]
pub struct SignedToken {
    header: Header,
    claims: Claims,
    signing_input: String,
    signature: String,
}

impl SignedToken {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// First two segments joined by `.`, the bytes the MAC covers.
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// Third segment, still base64url-encoded.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn token_id(&self) -> &str {
        &self.claims.jti
    }

    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

impl TokenCodec {
    /// Minimum key length for HS512 (the hash output size).
    pub const MIN_SECRET_LEN: usize = 64;

    /// Create a codec keyed with `secret`.
    ///
    /// # Arguments
    /// * `secret` - Shared MAC key (should be stored securely)
    ///
    /// # Returns
    /// TokenCodec configured with the HS512 algorithm
    ///
    /// # Errors
    /// * `InvalidKey` - Secret shorter than 64 bytes
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(JwtError::InvalidKey {
                min: Self::MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
        })
    }

    /// Sign claims into a compact token.
    ///
    /// # Arguments
    /// * `claims` - Claim set; `sub` must be non-empty and `exp` after `iat`
    ///
    /// # Returns
    /// Compact token string with header `{"typ":"JWT","alg":"HS512"}`
    ///
    /// # Errors
    /// * `InvalidClaims` - Empty subject or non-positive lifetime
    /// * `SigningFailed` - MAC computation or serialization failed
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        if claims.sub.is_empty() {
            return Err(JwtError::InvalidClaims("subject must not be empty".to_string()));
        }
        if claims.exp <= claims.iat {
            return Err(JwtError::InvalidClaims(format!(
                "expiration {} must be after issued-at {}",
                claims.exp, claims.iat
            )));
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Split and decode a compact token without checking its signature or
    /// any time-based claim.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// Parsed header, claims and the raw segments needed for verification
    ///
    /// # Errors
    /// * `MalformedToken` - Wrong segment count, bad base64url or bad JSON
    pub fn parse(&self, token: &str) -> Result<SignedToken, JwtError> {
        let mut segments = token.split('.');
        let (header_segment, payload_segment, signature_segment) = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() && !s.is_empty() => {
                (h, p, s)
            }
            _ => {
                return Err(JwtError::MalformedToken(
                    "expected three non-empty dot-separated segments".to_string(),
                ))
            }
        };

        let header =
            decode_header(token).map_err(|e| JwtError::MalformedToken(format!("header: {}", e)))?;

        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::MalformedToken(format!("payload: {}", e)))?
            .claims;

        Ok(SignedToken {
            header,
            claims,
            signing_input: format!("{}.{}", header_segment, payload_segment),
            signature: signature_segment.to_string(),
        })
    }

    /// Recompute the MAC over the first two segments and compare it with the
    /// signature segment.
    ///
    /// Tokens whose header announces anything other than HS512 never verify.
    pub fn verify(&self, token: &SignedToken) -> bool {
        if token.header.alg != self.algorithm {
            return false;
        }

        crypto::verify(
            &token.signature,
            token.signing_input.as_bytes(),
            &self.decoding_key,
            self.algorithm,
        )
        .unwrap_or(false)
    }
}
