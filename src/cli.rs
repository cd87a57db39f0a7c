use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "releng",
    about = "Workspace maintenance for Eclipse plug-in projects",
    long_about = "Maintenance tasks for a workspace of Eclipse plug-in projects.\nAdds copyright notices, bumps versions across manifests, features, poms and\np2 categories, distributes project settings and adds project natures.",
    version,
    after_help = "For detailed command help, run: releng <COMMAND> --help"
)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(
        short = 'C',
        long,
        global = true,
        help = "Workspace root directory (defaults to the current directory)"
    )]
    pub workspace: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file to use instead of <workspace>/releng.toml"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Report what would change without writing files")]
    pub dry_run: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Add the copyright notice to source files lacking one",
        long_about = "Prepend the configured copyright notice to every matching source file.\n\nA file already has a notice when its second line, without the leading\ncomment character, starts with the configured marker (default: Copyright).\nRunning the command twice changes nothing the second time."
    )]
    Copyright(CopyrightArgs),

    #[command(
        about = "Update version numbers across the workspace",
        long_about = "Set a new version in every project matching the prefix filter.\n\nUpdates, in order:\n  • MANIFEST.MF   Bundle-Version: X.Y.Z.qualifier (first occurrence)\n  • feature.xml   version=\"X.Y.Z.qualifier\" (first occurrence)\n  • pom.xml       <version>X.Y.Z-SNAPSHOT</version> (first occurrence)\n  • category.xml  X.Y.Z.qualifier (every occurrence)\n\nFiles are only written when their content changes. Without --to, the\nversion is prompted for."
    )]
    UpdateVersion(UpdateVersionArgs),

    #[command(
        about = "Copy a project's settings folder into other projects",
        long_about = "Copy every file of the source project's settings folder (default:\n.settings) into the settings folder of each target project, replacing files\nof the same name and leaving other files alone.\n\nTargets are the projects matching the prefix filter that contain the\nconfigured marker file (default: feature.xml)."
    )]
    CopySettings(CopySettingsArgs),

    #[command(
        about = "Add a nature to the selected projects",
        long_about = "Add a nature to the .project descriptor of each selected project.\n\nItems may be project names or paths to project folders. Projects that\nalready carry the nature are left untouched; files are skipped."
    )]
    AddNature(AddNatureArgs),

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum, help = "Shell type to generate completions for")]
        shell: clap_complete::Shell,
    },

    #[command(about = "Print version information")]
    Version,
}

#[derive(Args)]
pub struct CopyrightArgs {
    #[arg(long, help = "File name pattern to process (default from config: *.java)")]
    pub pattern: Option<String>,

    #[arg(short, long, help = "Only process projects whose name starts with this prefix")]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct UpdateVersionArgs {
    #[arg(short, long, help = "Version to upgrade to (MAJOR.MINOR.PATCH)")]
    pub to: Option<String>,

    #[arg(short, long, help = "Project name prefix (default from config)")]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct CopySettingsArgs {
    #[arg(short, long, help = "Project whose settings are copied")]
    pub from: Option<String>,

    #[arg(short, long, help = "Project name prefix (default from config)")]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct AddNatureArgs {
    #[arg(short, long, help = "Nature identifier (default from config)")]
    pub nature: Option<String>,

    #[arg(required = true, help = "Projects to convert (names or paths)")]
    pub items: Vec<String>,
}
