use clap::{Parser, Subcommand};

/// Command-line interface definition for tt
#[derive(Parser, Debug)]
#[command(
    name = "tt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep track of tasks and time, per project, in a local SQLite database",
    long_about = None
)]
pub struct Cli {
    /// Override database path
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Project to work on (defaults to the current directory name)
    #[arg(global = true, long = "project")]
    pub project: Option<String>,

    /// Sync with the server for this run, whatever the configuration says
    #[arg(global = true, long = "sync")]
    pub sync: bool,

    /// Answer yes to every confirmation
    #[arg(global = true, short = 'y', long = "yes")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the configuration file and database
    Init,

    /// Start tracking a task
    Start {
        /// Task name (default: "Working on <project>")
        taskname: Option<String>,
    },

    /// Pause the active task
    Pause,

    /// Resume a paused task
    Resume {
        /// Name of the paused task (required when several are paused)
        taskname: Option<String>,
    },

    /// Stop the active task and deal with paused ones
    Stop,

    /// Show active and paused tasks
    Status {
        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },

    /// List every task of the project, finished ones included
    List {
        /// Only tasks with this name
        taskname: Option<String>,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long, short = 'n', help = "Only the most recent N rows")]
        limit: Option<usize>,
    },

    /// Database maintenance
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,
    },

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the resolved configuration")]
        print_config: bool,
    },
}
