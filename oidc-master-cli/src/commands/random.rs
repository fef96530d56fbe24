use clap::Args;
use oidc_master_oidc::generate_random_string;

#[derive(Debug, Clone, Default, Args)]
pub struct RandomArgs {
    /// Number of characters (default: builder.random_length)
    #[arg(long, short)]
    pub length: Option<usize>,

    /// How many values to print
    #[arg(long, short, default_value_t = 1)]
    pub count: usize,
}

pub fn run(args: &RandomArgs, default_length: usize) -> String {
    let length = args.length.unwrap_or(default_length);
    (0..args.count.max(1))
        .map(|_| generate_random_string(length) + "\n")
        .collect()
}
