use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use platebook::api::BackupFormat;
use platebook::model::SortOrder;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "platebook",
    bin_name = "platebook",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "License-plate registry backed by a local SQLite file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub db: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Records,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Records => "Record Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "search" | "add" | "edit" | "update" | "delete" => {
                Some(CommandGroup::Records)
            }
            "backup" | "init" => Some(CommandGroup::Data),
            "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Records, CommandGroup::Data, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("platebook {version}\n"));
    output.push_str("License-plate registry backed by a local SQLite file\n");
    output.push('\n');
    output.push_str("Usage: platebook [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --db <PATH>  Database file to use instead of the configured one\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Records(c)) => match c {
            RecordCommands::List { .. } => "list",
            RecordCommands::Search { .. } => "search",
            RecordCommands::Add { .. } => "add",
            RecordCommands::Edit { .. } => "edit",
            RecordCommands::Update { .. } => "update",
            RecordCommands::Delete { .. } => "delete",
        },
        Some(Commands::Data(c)) => match c {
            DataCommands::Backup { .. } => "backup",
            DataCommands::Init => "init",
        },
        Some(Commands::Misc(MiscCommands::Config { .. })) => "config",
        None => {
            print_grouped_help();
            return;
        }
    };

    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Records(RecordCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Id,
    Plate,
    Phone,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Id => SortOrder::Id,
            SortArg::Plate => SortOrder::Plate,
            SortArg::Phone => SortOrder::Phone,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackupFormatArg {
    Json,
    Db,
}

impl From<BackupFormatArg> for BackupFormat {
    fn from(arg: BackupFormatArg) -> Self {
        match arg {
            BackupFormatArg::Json => BackupFormat::Json,
            BackupFormatArg::Db => BackupFormat::Database,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// List every record
    #[command(alias = "ls")]
    List {
        /// Sort order (defaults to the configured one)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Search by plate parts (or by phone with --phone)
    #[command(alias = "s")]
    Search {
        /// Plate part 1, or the phone number with --phone
        #[arg(default_value = "")]
        first: String,

        /// Plate part 2 (ignored with --phone)
        #[arg(default_value = "")]
        second: String,

        /// Search phone numbers instead of plates
        #[arg(short, long)]
        phone: bool,

        /// Sort order (defaults to the configured one)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Add a record
    #[command(alias = "a")]
    Add {
        /// First part of the plate (up to 4 letters/digits)
        part1: String,

        /// Second part of the plate (up to 4 letters/digits)
        part2: String,

        /// Phone number (digits only, up to 10)
        phone: String,

        /// Free-text note
        #[arg(default_value = "")]
        note: String,

        /// Save even if the plate is registered under another phone number
        #[arg(short, long, conflicts_with = "no")]
        yes: bool,

        /// Never save if the plate is registered under another phone number
        #[arg(short, long)]
        no: bool,
    },

    /// Rewrite a record by id (see `list`)
    #[command(alias = "e")]
    Edit {
        /// Record id
        id: i64,

        /// First part of the plate
        part1: String,

        /// Second part of the plate
        part2: String,

        /// Phone number
        phone: String,

        /// Free-text note
        #[arg(default_value = "")]
        note: String,
    },

    /// Set phone number and note for every record of a plate
    #[command(alias = "u")]
    Update {
        /// Plate, e.g. ABC-1234
        plate: String,

        /// New phone number
        phone: String,

        /// New note
        #[arg(default_value = "")]
        note: String,
    },

    /// Delete every record of a plate
    #[command(alias = "rm")]
    Delete {
        /// Plate, e.g. ABC-1234
        plate: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Back up the database
    Backup {
        /// json: dump of all records, db: copy of the database file
        #[arg(short, long, value_enum, default_value = "json")]
        format: BackupFormatArg,

        /// Target file or directory (defaults to the configured backup dir)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Create the database, or check that it is there
    Init,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    Config {
        /// Configuration key (database-file, sort, backup-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
