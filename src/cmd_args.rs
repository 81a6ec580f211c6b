use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Optional. Profile section to read page URL and endpoint from. Default is 'default'.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Embedding page URL
    /// Optional. Page the modal fragment path is resolved against.
    #[clap(long, help = "URL of the page embedding the widget")]
    page_url: Option<String>,

    /// Signup endpoint
    /// Optional. Overrides the endpoint of the profile and the environment.
    #[clap(long, help = "marketing endpoint receiving the signup")]
    endpoint: Option<String>,

    /// Email address
    /// Optional. Read from standard input when omitted.
    #[clap(short = 'e', long, help = "email address to sign up")]
    email: Option<String>,

    /// Verbose mode
    /// Optional. Print verbose messages.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    page_url: Option<String>,
    endpoint: Option<String>,
    email: Option<String>,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            page_url: args.page_url,
            endpoint: args.endpoint,
            email: args.email,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
