mod ui;

use std::time::Instant;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};

use entropass::alphabet::{AlphabetBuilder, AlphabetOp, CharacterGroups};
use entropass::{GenerationJob, generate_with_progress, hash};

#[derive(Parser)]
#[command(
    name = "entropass",
    version,
    about = "Generates passwords from raw OS entropy folded through a cryptographic digest"
)]
struct Cli {
    #[arg(short, long, default_value_t = 8)]
    length: usize,

    #[arg(short, long, default_value_t = 2)]
    rounds: usize,

    #[arg(short = 'n', long, default_value_t = 1)]
    amount: usize,

    #[arg(short, long, default_value = hash::DEFAULT_ALGORITHM)]
    algorithm: String,

    #[arg(short, long, action = ArgAction::Append, value_name = "CHARS")]
    chars: Vec<String>,

    #[arg(short, long, action = ArgAction::Append, value_name = "CHARS")]
    exclude: Vec<String>,

    #[arg(short, long, action = ArgAction::Append, value_name = "GROUP")]
    group: Vec<String>,

    #[arg(short = 'x', long, action = ArgAction::Append, value_name = "GROUP")]
    exclude_group: Vec<String>,

    #[arg(long)]
    list_algorithms: bool,

    #[arg(long)]
    list_groups: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let groups = CharacterGroups::new();

    if cli.list_algorithms {
        for name in hash::available() {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.list_groups {
        for name in groups.names() {
            let chars: String = groups
                .get(name)
                .unwrap_or_default()
                .iter()
                .collect();
            println!("{name}: {chars}");
        }
        return Ok(());
    }

    let mut builder = AlphabetBuilder::new(&groups);
    for op in alphabet_ops(&matches) {
        builder.apply(&op)?;
    }
    let alphabet = builder.finalize();

    let job = GenerationJob::new(cli.length, cli.rounds, cli.amount, &cli.algorithm, alphabet)?;

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    ui::display_settings(&job, &options);

    let bar = ui::progress_bar(&job, &options);
    let start = Instant::now();
    let passwords = generate_with_progress(&job, |progress| ui::update_progress(&bar, progress))?;
    let elapsed = start.elapsed();
    bar.finish_and_clear();

    for password in &passwords {
        println!("{}", &**password);
    }

    ui::display_stats(&job, elapsed, &options);

    Ok(())
}

// The four alphabet flags are interleaved back into argv order; add and
// remove operations are order-sensitive.
fn alphabet_ops(matches: &ArgMatches) -> Vec<AlphabetOp> {
    let mut ops: Vec<(usize, AlphabetOp)> = Vec::new();

    collect_ops(&mut ops, matches, "chars", AlphabetOp::AddChars);
    collect_ops(&mut ops, matches, "exclude", AlphabetOp::RemoveChars);
    collect_ops(&mut ops, matches, "group", AlphabetOp::AddGroup);
    collect_ops(&mut ops, matches, "exclude_group", AlphabetOp::RemoveGroup);

    ops.sort_by_key(|(index, _)| *index);
    ops.into_iter().map(|(_, op)| op).collect()
}

fn collect_ops(
    ops: &mut Vec<(usize, AlphabetOp)>,
    matches: &ArgMatches,
    id: &str,
    build: impl Fn(String) -> AlphabetOp,
) {
    if let (Some(indices), Some(values)) = (matches.indices_of(id), matches.get_many::<String>(id))
    {
        ops.extend(
            indices
                .zip(values)
                .map(|(index, value)| (index, build(value.clone()))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops_for(argv: &[&str]) -> Vec<AlphabetOp> {
        let matches = Cli::command().get_matches_from(argv);
        alphabet_ops(&matches)
    }

    #[test]
    fn test_ops_preserve_argv_order() {
        let ops = ops_for(&["entropass", "-g", "a-z", "-c", "!?", "-x", "a-z", "-e", "!"]);
        assert_eq!(
            ops,
            vec![
                AlphabetOp::AddGroup("a-z".to_string()),
                AlphabetOp::AddChars("!?".to_string()),
                AlphabetOp::RemoveGroup("a-z".to_string()),
                AlphabetOp::RemoveChars("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_flags_keep_relative_order() {
        let ops = ops_for(&["entropass", "-g", "0-9", "-g", "A-Z"]);
        assert_eq!(
            ops,
            vec![
                AlphabetOp::AddGroup("0-9".to_string()),
                AlphabetOp::AddGroup("A-Z".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_alphabet_flags_means_no_ops() {
        assert!(ops_for(&["entropass"]).is_empty());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["entropass"]);
        assert_eq!(cli.length, 8);
        assert_eq!(cli.rounds, 2);
        assert_eq!(cli.amount, 1);
        assert_eq!(cli.algorithm, "SHA-256");
        assert!(!cli.quiet);
    }
}
