// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   train — train and checkpoint the model
//   infer — score reviews with an existing checkpoint
//   run   — train, then infer (the whole tutorial in one go)
//
// clap's derive macros generate --help, error messages and type
// conversion for every flag below.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::infer_use_case::{InferConfig, DEFAULT_REVIEWS};
use crate::application::train_use_case::{SentimentConfig, TrainConfig, DEFAULT_PARAMS_DIR};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sentiment model and checkpoint it
    Train(TrainArgs),

    /// Score reviews with a trained checkpoint
    Infer(InferArgs),

    /// Train, then score reviews with the fresh checkpoint
    Run(RunArgs),
}

/// Arguments for the `train` command.
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Full dataset used to build the word dictionary
    #[arg(long, default_value = "data/one_word_reviews.json")]
    pub all_data: String,

    /// Training split
    #[arg(long, default_value = "data/one_word_reviews_train.json")]
    pub train_file: String,

    /// Test split, evaluated periodically during training
    #[arg(long, default_value = "data/one_word_reviews_test.json")]
    pub test_file: String,

    /// Directory the model parameters are saved to
    #[arg(long, default_value = DEFAULT_PARAMS_DIR)]
    pub params_dir: String,

    /// Number of output classes
    #[arg(long, default_value_t = 2)]
    pub class_dim: usize,

    /// Word embedding width
    #[arg(long, default_value_t = 128)]
    pub emb_dim: usize,

    /// Filters per convolution branch
    #[arg(long, default_value_t = 512)]
    pub hid_dim: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adagrad learning rate
    #[arg(long, default_value_t = 0.002)]
    pub lr: f64,

    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// Shuffle buffer size in reviews
    #[arg(long, default_value_t = 25000)]
    pub shuffle_buf: usize,

    /// Evaluate on the test split every N steps
    #[arg(long, default_value_t = 10)]
    pub eval_every: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            all_data:    a.all_data,
            train_file:  a.train_file,
            test_file:   a.test_file,
            params_dir:  a.params_dir,
            num_epochs:  a.epochs,
            shuffle_buf: a.shuffle_buf,
            eval_every:  a.eval_every,
            hyper: SentimentConfig {
                class_dim:     a.class_dim,
                emb_dim:       a.emb_dim,
                hid_dim:       a.hid_dim,
                batch_size:    a.batch_size,
                learning_rate: a.lr,
            },
        }
    }
}

/// Arguments for the `infer` command.
#[derive(Args, Debug, Clone)]
pub struct InferArgs {
    /// Full dataset used to rebuild the word dictionary
    #[arg(long, default_value = "data/one_word_reviews.json")]
    pub all_data: String,

    /// Directory the model parameters were saved to
    #[arg(long, default_value = DEFAULT_PARAMS_DIR)]
    pub params_dir: String,

    /// Comma-separated reviews to score (default: the built-in word list)
    #[arg(long, value_delimiter = ',')]
    pub words: Vec<String>,
}

impl From<InferArgs> for InferConfig {
    fn from(a: InferArgs) -> Self {
        InferConfig {
            all_data:   a.all_data,
            params_dir: a.params_dir,
            reviews:    reviews_or_default(a.words),
        }
    }
}

/// Arguments for the `run` command: everything `train` takes plus the
/// reviews to score afterwards.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Comma-separated reviews to score (default: the built-in word list)
    #[arg(long, value_delimiter = ',')]
    pub words: Vec<String>,
}

/// An empty `--words` list means "use the built-in reviews".
pub fn reviews_or_default(words: Vec<String>) -> Vec<String> {
    if words.is_empty() {
        DEFAULT_REVIEWS.iter().map(|s| s.to_string()).collect()
    } else {
        words
    }
}
