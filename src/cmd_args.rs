use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Optional. Section of the profile file to read the API settings from.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// API base URL
    /// Optional. Overrides the base_url of the profile.
    #[clap(short = 'b', long, help = "API base URL, e.g. https://jsonplaceholder.typicode.com")]
    base_url: Option<String>,

    /// Verbose mode
    /// Optional. Write debug logs to the log file.
    #[clap(
        short = 'v',
        long,
        help = "Write debug logs to the log file",
        default_value = "false"
    )]
    verbose: bool,

    /// Log file
    /// Optional. Enables logging to the given file.
    #[clap(long, help = "log file path")]
    log_file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    base_url: Option<String>,
    verbose: bool,
    log_file: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            base_url: args.base_url,
            verbose: args.verbose,
            log_file: args.log_file,
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }
}
