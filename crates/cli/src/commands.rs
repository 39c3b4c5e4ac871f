use clap::Subcommand;
use model::tender::category::Category;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the admin HTTP server
    Serve,
    /// Reconcile a single category and print its stats
    Sync {
        #[arg(long, help = "Category to reconcile, e.g. activas or awarded")]
        category: Category,
    },
    /// Reconcile every category in sequence and print the run report
    Run {
        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Show the indexed state of one tender
    Lookup {
        #[arg(long, help = "Tender code")]
        id: String,
    },
}
