use digest::DynDigest;

use crate::error::Error;

pub const DEFAULT_ALGORITHM: &str = "SHA-256";

const ALGORITHMS: &[&str] = &[
    "BLAKE2b-512",
    "BLAKE2s-256",
    "MD5",
    "SHA-1",
    "SHA-224",
    "SHA-256",
    "SHA-384",
    "SHA-512",
    "SHA3-256",
    "SHA3-512",
];

pub fn available() -> &'static [&'static str] {
    ALGORITHMS
}

pub fn create(name: &str) -> Result<Box<dyn DynDigest + Send>, Error> {
    let hasher: Box<dyn DynDigest + Send> = match name.to_ascii_lowercase().as_str() {
        "blake2b-512" => Box::new(blake2::Blake2b512::default()),
        "blake2s-256" => Box::new(blake2::Blake2s256::default()),
        "md5" => Box::new(md5::Md5::default()),
        "sha-1" | "sha1" => Box::new(sha1::Sha1::default()),
        "sha-224" | "sha224" => Box::new(sha2::Sha224::default()),
        "sha-256" | "sha256" => Box::new(sha2::Sha256::default()),
        "sha-384" | "sha384" => Box::new(sha2::Sha384::default()),
        "sha-512" | "sha512" => Box::new(sha2::Sha512::default()),
        "sha3-256" => Box::new(sha3::Sha3_256::default()),
        "sha3-512" => Box::new(sha3::Sha3_512::default()),
        _ => return Err(Error::UnknownAlgorithm(name.to_string())),
    };

    Ok(hasher)
}

pub fn output_size(name: &str) -> Result<usize, Error> {
    create(name).map(|hasher| hasher.output_size())
}
