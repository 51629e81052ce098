use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use entropass::{GenerationJob, Progress};

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn progress_bar(job: &GenerationJob, options: &DisplayOptions) -> ProgressBar {
    if options.quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(job.total_bytes());

    let style = ProgressStyle::default_bar()
        .template("{bar:40} {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let style = if options.unicode_support {
        style.progress_chars("█▓░")
    } else {
        style.progress_chars("#>-")
    };
    pb.set_style(style);

    pb
}

pub fn update_progress(pb: &ProgressBar, progress: &Progress) {
    pb.set_position(progress.bytes_processed);
    pb.set_message(format!(
        "password {}/{}, char {}/{} ({} bytes left)",
        progress.password_index,
        progress.password_count,
        progress.char_index,
        progress.password_length,
        progress.bytes_remaining
    ));
}

pub fn display_settings(job: &GenerationJob, options: &DisplayOptions) {
    if options.quiet {
        return;
    }

    let digest_size = job.bytes_per_char() / job.rounds();

    println!("Settings:");
    println!(
        "  ├─ Algorithm  {} ({digest_size}-byte digest)",
        job.algorithm()
    );
    println!("  ├─ Alphabet   {} chars", job.alphabet().len());
    println!("  ├─ Length     {}", job.password_length());
    println!(
        "  ├─ Rounds     {} ({} bytes per char)",
        job.rounds(),
        job.bytes_per_char()
    );
    println!("  └─ Amount     {}", job.password_count());
    println!();
}

pub fn display_stats(job: &GenerationJob, elapsed: Duration, options: &DisplayOptions) {
    if options.quiet {
        return;
    }

    let entropy = job.password_length() as f64 * (job.alphabet().len() as f64).log2();
    let entropy_style = if options.color_support {
        Style::new().green()
    } else {
        Style::new()
    };

    println!();
    println!("Stats:");
    println!(
        "  ├─ Entropy    {} bits per password",
        entropy_style.apply_to(format!("{entropy:.1}"))
    );
    println!("  ├─ Collected  {} bytes", job.total_bytes());
    println!("  └─ Time       {:.1}s", elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(quiet: bool) -> DisplayOptions {
        DisplayOptions {
            unicode_support: false,
            color_support: false,
            quiet,
        }
    }

    fn job() -> GenerationJob {
        GenerationJob::new(8, 2, 1, "SHA-256", "0123456789".chars().collect()).unwrap()
    }

    #[test]
    fn test_progress_bar_length_matches_job() {
        let pb = progress_bar(&job(), &options(false));
        assert_eq!(pb.length(), Some(512));
    }

    #[test]
    fn test_progress_bar_hidden_when_quiet() {
        let pb = progress_bar(&job(), &options(true));
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_update_progress_moves_position() {
        let pb = progress_bar(&job(), &options(false));
        update_progress(
            &pb,
            &Progress {
                password_index: 1,
                password_count: 1,
                char_index: 3,
                password_length: 8,
                bytes_remaining: 32,
                bytes_processed: 160,
                total_bytes: 512,
            },
        );
        assert_eq!(pb.position(), 160);
    }
}
