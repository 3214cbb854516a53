use argon2::{
    Argon2, Params,
    password_hash::{
        Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::{OsRng, RngCore},
    },
};
use chrono::{DateTime, Duration, Utc};

use std::sync::OnceLock;

pub const OTP_LENGTH: usize = 4;
pub const OTP_TTL_MINUTES: i64 = 10;

/// Issues and checks the short numeric login codes. Codes are never stored in
/// the clear; only an Argon2id hash reaches the database.
pub struct OtpManager;

static INSTANCE: OnceLock<Argon2> = OnceLock::new();

impl OtpManager {
    fn engine() -> &'static Argon2<'static> {
        INSTANCE.get_or_init(|| {
            let params = Params::new(
                64 * 1024, // 64MB Memory (m)
                3,         // 3 Iterations (t)
                4,         // 4 Parallelism lanes (p)
                None,      // Default hash length (32 bytes)
            )
            .expect("Invalid Argon2 parameters");

            Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
        })
    }

    /// A fresh code of [`OTP_LENGTH`] digits from OS randomness.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        (0..OTP_LENGTH)
            .map(|_| char::from(b'0' + (rng.next_u32() % 10) as u8))
            .collect()
    }

    pub fn expires_at(issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::minutes(OTP_TTL_MINUTES)
    }

    pub fn hash_code(code: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::engine().hash_password(code.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    pub fn verify_code(code: &str, stored_hash: &str) -> Result<bool, Error> {
        let parsed_hash = PasswordHash::new(stored_hash)?;

        let result = Self::engine().verify_password(code.as_bytes(), &parsed_hash);

        match result {
            Ok(_) => Ok(true),
            Err(Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
