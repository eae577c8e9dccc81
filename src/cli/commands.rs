use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pymatuning::error::Result;
use pymatuning::render::{package_structure, MarkerStyle, OutlineRenderer};
use pymatuning::resolver::FsResolver;
use pymatuning::tree::{list_all_submodules, InterfaceTreeBuilder, ModulePath, PackageTree};
use pymatuning::{load_config, Config, ConfigOverrides};

#[derive(Parser)]
#[command(name = "pymatuning")]
#[command(about = "Render a Python package's interface as an org-mode outline or checklist")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Outline of a package found in the current directory
    pymatuning orgmode mypkg

    # Checklist of a subpackage, searching ./src first
    pymatuning -p src orgmode mypkg.io --marker checklist

    # List every module of the package
    pymatuning modules mypkg

    # Nested package structure as JSON
    pymatuning structure mypkg
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory to search for modules (repeatable, searched in order)
    #[arg(short = 'p', long = "search-path", global = true)]
    pub search_paths: Vec<PathBuf>,

    /// Path to a configuration file (defaults to ./.pymatuning.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the package interface as an org-mode list
    Orgmode {
        /// Dotted path of the root module or package
        modname: String,

        /// Line marker style
        #[arg(long, value_enum)]
        marker: Option<MarkerStyle>,

        /// Spaces per nesting level
        #[arg(long)]
        indent: Option<usize>,
    },

    /// List the fully qualified names of all modules in the package
    Modules {
        /// Dotted path of the root module or package
        modname: String,
    },

    /// Print the nested package structure as JSON
    Structure {
        /// Dotted path of the root module or package
        modname: String,
    },

    /// Print the definitions of every module as JSON
    Definitions {
        /// Dotted path of the root module or package
        modname: String,
    },
}

/// Configuration file merged with command-line overrides
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let (marker, indent_width) = match &cli.command {
        Commands::Orgmode { marker, indent, .. } => (*marker, *indent),
        _ => (None, None),
    };

    load_config(cli.config.as_deref())?.merge(ConfigOverrides {
        search_paths: cli.search_paths.clone(),
        indent_width,
        marker,
    })
}

fn resolver_for(config: &Config) -> FsResolver {
    FsResolver::new(config.search_paths.clone())
}

pub fn orgmode(config: &Config, modname: &str) -> Result<()> {
    let resolver = resolver_for(config);
    let tree = InterfaceTreeBuilder::new(&resolver).build(&ModulePath::new(modname))?;
    let output = OutlineRenderer::with_style(config.indent_width, config.marker).render(&tree)?;

    println!("{}", output);
    Ok(())
}

pub fn list_modules(config: &Config, modname: &str) -> Result<()> {
    let resolver = resolver_for(config);
    let modules = list_all_submodules(&resolver, &ModulePath::new(modname))?;

    for module in modules {
        println!("{}", module);
    }
    Ok(())
}

pub fn show_structure(config: &Config, modname: &str) -> Result<()> {
    let resolver = resolver_for(config);
    let tree = PackageTree::discover(&resolver, &ModulePath::new(modname))?;
    let structure = package_structure(&tree);

    println!("{}", serde_json::to_string_pretty(&structure)?);
    Ok(())
}

pub fn show_definitions(config: &Config, modname: &str) -> Result<()> {
    let resolver = resolver_for(config);
    let tree = PackageTree::discover(&resolver, &ModulePath::new(modname))?;
    let definitions = InterfaceTreeBuilder::new(&resolver).package_definitions(&tree)?;

    println!("{}", serde_json::to_string_pretty(&definitions)?);
    Ok(())
}
