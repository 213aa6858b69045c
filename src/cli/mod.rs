// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, picks the compute placement and
// hands the chosen use case to the backend launcher. Results are
// printed here; no other layer formats output for the user.
//
// `--use-gpu` on a build without the `wgpu` feature exits 0
// without doing anything.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{reviews_or_default, Commands, InferArgs, RunArgs, TrainArgs};

use crate::application::infer_use_case::{InferUseCase, ReviewScore};
use crate::application::run_use_case::RunUseCase;
use crate::application::train_use_case::TrainUseCase;
use crate::ml::backend::{launch, Placement};
use crate::ml::trainer::TrainSummary;

#[derive(Parser, Debug)]
#[command(
    name = "oneword-conv",
    version,
    about = "Train a convolutional sentiment model on one-word reviews, then score words with it."
)]
pub struct Cli {
    /// Run on the GPU (needs a build with the `wgpu` feature)
    #[arg(long, global = true)]
    pub use_gpu: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let placement = Placement::from_flag(self.use_gpu);
        match self.command {
            Commands::Train(args) => run_train(placement, args),
            Commands::Infer(args) => run_infer(placement, args),
            Commands::Run(args)   => run_all(placement, args),
        }
    }
}

fn run_train(placement: Placement, args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on '{}'", args.train_file);
    if let Some(summary) = launch(placement, TrainUseCase::new(args.into()))? {
        print_summary(&summary);
    }
    Ok(())
}

fn run_infer(placement: Placement, args: InferArgs) -> Result<()> {
    if let Some(scores) = launch(placement, InferUseCase::new(args.into()))? {
        print_scores(&scores);
    }
    Ok(())
}

fn run_all(placement: Placement, args: RunArgs) -> Result<()> {
    let reviews = reviews_or_default(args.words);
    if let Some((summary, scores)) = launch(placement, RunUseCase::new(args.train.into(), reviews))? {
        print_summary(&summary);
        print_scores(&scores);
    }
    Ok(())
}

fn print_summary(summary: &TrainSummary) {
    match summary.last_eval {
        Some(eval) => println!(
            "Training complete: {} steps over {} epoch(s), last test loss {:.4}, acc {:.4}",
            summary.steps, summary.epochs, eval.loss, eval.accuracy
        ),
        None => println!(
            "Training complete: {} steps over {} epoch(s)",
            summary.steps, summary.epochs
        ),
    }
}

fn print_scores(scores: &[ReviewScore]) {
    for s in scores {
        println!("{}", score_line(s));
    }
}

/// `good  positive:  0.8 negative:  0.2`: fields space-separated,
/// probabilities in their shortest round-trip form.
fn score_line(s: &ReviewScore) -> String {
    format!("{}  positive:  {} negative:  {}", s.review, s.positive(), s.negative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;

    #[test]
    fn test_parses_train_flags() {
        let cli = Cli::try_parse_from([
            "oneword-conv", "train", "--batch-size", "16", "--lr", "0.01", "--epochs", "3",
        ]).unwrap();
        assert!(!cli.use_gpu);
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.hyper.batch_size, 16);
        assert_eq!(cfg.hyper.learning_rate, 0.01);
        assert_eq!(cfg.num_epochs, 3);
        assert_eq!(cfg.hyper.emb_dim, 128);
    }

    #[test]
    fn test_use_gpu_is_global() {
        let cli = Cli::try_parse_from(["oneword-conv", "infer", "--use-gpu"]).unwrap();
        assert!(cli.use_gpu);
    }

    #[test]
    fn test_words_override_default_list() {
        let cli = Cli::try_parse_from(["oneword-conv", "run", "--words", "good,bad day"]).unwrap();
        let Commands::Run(args) = cli.command else { panic!("expected run") };
        assert_eq!(reviews_or_default(args.words), vec!["good", "bad day"]);
    }

    #[test]
    fn test_missing_words_uses_default_list() {
        let cli = Cli::try_parse_from(["oneword-conv", "infer"]).unwrap();
        let Commands::Infer(args) = cli.command else { panic!("expected infer") };
        assert_eq!(reviews_or_default(args.words).len(), 20);
    }

    #[test]
    fn test_score_line_layout() {
        let score = ReviewScore { review: "good".to_string(), probs: vec![0.75, 0.25] };
        assert_eq!(score_line(&score), "good  positive:  0.75 negative:  0.25");
    }

    #[cfg(not(feature = "wgpu"))]
    #[test]
    fn test_gpu_request_without_feature_does_nothing() {
        // Points at files that do not exist; the run must not touch them.
        let cli = Cli::try_parse_from([
            "oneword-conv", "--use-gpu", "train", "--all-data", "/nonexistent/all.json",
        ]).unwrap();
        assert!(cli.run().is_ok());
    }
}
