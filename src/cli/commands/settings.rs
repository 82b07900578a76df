use clap::{Args, Subcommand};

#[derive(Args)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommands,
}

#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// List settings, one page at a time
    List {
        /// Only show settings whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Add a new setting
    Add {
        /// Unique setting name, used as the form field
        #[arg(long)]
        name: String,
        /// Display title
        #[arg(long)]
        title: String,
        /// Form control: text, textarea, picture, file or switch
        #[arg(long = "type", default_value = "text")]
        setting_type: String,
        /// Group the setting is shown under
        #[arg(long, default_value = "")]
        group: String,
        #[arg(long, default_value = "")]
        remark: String,
    },
    /// Change a setting's definition, keeping its stored value and status
    Edit {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        title: String,
        #[arg(long = "type", default_value = "text")]
        setting_type: String,
        #[arg(long, default_value = "")]
        group: String,
        #[arg(long, default_value = "")]
        remark: String,
    },
    /// Enable settings by id
    Enable {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Disable settings by id
    Disable {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Delete settings by id
    Delete {
        #[arg(required = true)]
        ids: Vec<u64>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}
