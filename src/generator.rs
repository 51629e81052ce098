use std::time::Duration;

use zeroize::Zeroizing;

use crate::entropy::EntropyAccumulator;
use crate::error::Error;
use crate::hash;
use crate::selector;

pub const MAX_ROUNDS: usize = 1_048_576;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct GenerationJob {
    length: usize,
    rounds: usize,
    count: usize,
    algorithm: String,
    alphabet: Vec<char>,
    bytes_per_char: usize,
}

impl GenerationJob {
    pub fn new(
        length: usize,
        rounds: usize,
        count: usize,
        algorithm: &str,
        alphabet: Vec<char>,
    ) -> Result<Self, Error> {
        if length == 0 {
            return Err(Error::InvalidConfiguration(
                "length must be greater than zero".to_string(),
            ));
        }
        if rounds == 0 {
            return Err(Error::InvalidConfiguration(
                "rounds must be greater than zero".to_string(),
            ));
        }
        if rounds > MAX_ROUNDS {
            return Err(Error::InvalidConfiguration(format!(
                "rounds must be smaller or equal to {MAX_ROUNDS}"
            )));
        }
        if count == 0 {
            return Err(Error::InvalidConfiguration(
                "amount must be greater than zero".to_string(),
            ));
        }
        if alphabet.is_empty() {
            return Err(Error::InvalidConfiguration(
                "alphabet must not be empty".to_string(),
            ));
        }

        // Resolves the algorithm once, before any accumulator exists.
        let digest_size = hash::output_size(algorithm)?;

        Ok(Self {
            length,
            rounds,
            count,
            algorithm: algorithm.to_string(),
            alphabet,
            bytes_per_char: rounds * digest_size,
        })
    }

    pub fn password_length(&self) -> usize {
        self.length
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn password_count(&self) -> usize {
        self.count
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn bytes_per_char(&self) -> usize {
        self.bytes_per_char
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes_per_char as u64 * self.length as u64 * self.count as u64
    }
}

#[derive(Debug, Clone)]
pub struct Progress {
    pub password_index: usize,
    pub password_count: usize,
    pub char_index: usize,
    pub password_length: usize,
    pub bytes_remaining: usize,
    pub bytes_processed: u64,
    pub total_bytes: u64,
}

pub fn generate(job: &GenerationJob) -> Result<Vec<Zeroizing<String>>, Error> {
    generate_with_progress(job, |_| {})
}

pub fn generate_with_progress<F>(
    job: &GenerationJob,
    mut sink: F,
) -> Result<Vec<Zeroizing<String>>, Error>
where
    F: FnMut(&Progress),
{
    let total_bytes = job.total_bytes();
    let mut bytes_processed: u64 = 0;
    let mut passwords = Vec::with_capacity(job.count);

    for number in 1..=job.count {
        let mut password = Zeroizing::new(String::with_capacity(job.length));

        for position in 1..=job.length {
            let hasher = hash::create(&job.algorithm)?;
            let mut accumulator = EntropyAccumulator::new(job.bytes_per_char, hasher);
            accumulator.start()?;

            let mut last_remaining = job.bytes_per_char;
            sink(&Progress {
                password_index: number,
                password_count: job.count,
                char_index: position,
                password_length: job.length,
                bytes_remaining: last_remaining,
                bytes_processed,
                total_bytes,
            });

            loop {
                let (remaining, finished) = accumulator.wait(POLL_INTERVAL);

                if remaining != last_remaining {
                    bytes_processed += (last_remaining - remaining) as u64;
                    last_remaining = remaining;
                    sink(&Progress {
                        password_index: number,
                        password_count: job.count,
                        char_index: position,
                        password_length: job.length,
                        bytes_remaining: remaining,
                        bytes_processed,
                        total_bytes,
                    });
                }

                if finished {
                    break;
                }
            }

            let digest = accumulator.result()?;
            password.push(selector::select(&digest, &job.alphabet));
        }

        passwords.push(password);
    }

    Ok(passwords)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Vec<char> {
        "0123456789".chars().collect()
    }

    #[test]
    fn test_generates_requested_shape() {
        let job = GenerationJob::new(8, 2, 1, "SHA-256", digits()).unwrap();
        let passwords = generate(&job).unwrap();

        assert_eq!(passwords.len(), 1);
        assert_eq!(passwords[0].chars().count(), 8);
        for c in passwords[0].chars() {
            assert!(c.is_ascii_digit());
        }
    }

    #[test]
    fn test_single_char_alphabet() {
        let job = GenerationJob::new(1, 1, 5, "SHA-256", vec!['a']).unwrap();
        let passwords = generate(&job).unwrap();

        assert_eq!(passwords.len(), 5);
        for password in &passwords {
            assert_eq!(&**password, "a");
        }
    }

    #[test]
    fn test_passwords_are_independent() {
        let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
        let job = GenerationJob::new(16, 1, 2, "SHA-256", alphabet).unwrap();
        let passwords = generate(&job).unwrap();

        assert_eq!(passwords.len(), 2);
        assert_ne!(&*passwords[0], &*passwords[1]);
    }

    #[test]
    fn test_bytes_per_char() {
        let job = GenerationJob::new(8, 2, 1, "SHA-256", digits()).unwrap();
        assert_eq!(job.bytes_per_char(), 64);
        assert_eq!(job.total_bytes(), 512);

        let job = GenerationJob::new(4, 3, 2, "SHA-512", digits()).unwrap();
        assert_eq!(job.bytes_per_char(), 192);
        assert_eq!(job.total_bytes(), 1536);
    }

    #[test]
    fn test_progress_reaches_total() {
        let job = GenerationJob::new(2, 1, 2, "SHA-256", digits()).unwrap();

        let mut events = Vec::new();
        let passwords = generate_with_progress(&job, |progress| {
            events.push((progress.bytes_processed, progress.bytes_remaining));
        })
        .unwrap();

        assert_eq!(passwords.len(), 2);
        assert!(!events.is_empty());

        let mut last_processed = 0;
        for (processed, _) in &events {
            assert!(*processed >= last_processed);
            last_processed = *processed;
        }
        assert_eq!(last_processed, job.total_bytes());
        assert_eq!(events.last().unwrap().1, 0);
    }

    #[test]
    fn test_rejects_zero_length() {
        let err = GenerationJob::new(0, 2, 1, "SHA-256", digits()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let err = GenerationJob::new(8, 0, 1, "SHA-256", digits()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_oversized_rounds() {
        assert!(GenerationJob::new(8, MAX_ROUNDS, 1, "SHA-256", digits()).is_ok());

        let err = GenerationJob::new(8, MAX_ROUNDS + 1, 1, "SHA-256", digits()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_zero_amount() {
        let err = GenerationJob::new(8, 2, 0, "SHA-256", digits()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_empty_alphabet() {
        let err = GenerationJob::new(8, 2, 1, "SHA-256", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let err = GenerationJob::new(8, 2, 1, "WHIRLPOOL-9000", digits()).unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm(_)));
    }
}
