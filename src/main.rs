use std::path::PathBuf ;
use std::process::ExitCode ;
use anyhow::{ Context, Result };
use clap::Parser ;
use tracing_subscriber::EnvFilter ;

use mixin_weaver::{ Catalog, Diagnostic, OutputDir, OutputMode, drive };



/// Generates forwarding partial types for the composites declared in a manifest.
#[derive( Parser, Debug )]
#[command( name = "mixin-weaver", version, about )]
struct Cli {
    /// Manifest declaring contracts, provider types and composites
    manifest: PathBuf,
    /// Directory receiving the generated files [default: `generated` next to the manifest]
    #[arg( long, short )]
    out_dir: Option<PathBuf>,
    /// Write nothing; fail if any generated file is missing or out of date
    #[arg( long )]
    check: bool,
    /// Treat warnings as errors
    #[arg( long )]
    deny_warnings: bool,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg( long, short )]
    verbose: bool,
}

fn main() -> ExitCode {

    let cli = Cli::parse();
    init_logging( cli.verbose );

    match run( &cli ) {
        Ok( true ) => ExitCode::SUCCESS,
        Ok( false ) => ExitCode::FAILURE,
        Err( err ) => {
            eprintln!( "error: {:#}", err );
            ExitCode::FAILURE
        }
    }

}

fn init_logging( verbose: bool ) {
    let default = match verbose {
        true => "mixin_weaver=debug",
        false => "mixin_weaver=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(| _ | EnvFilter::new( default ));
    // keep an already installed subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter )
        .with_writer( std::io::stderr )
        .with_target( false )
        .compact()
        .try_init();
}

/// Returns whether the run succeeded.
fn run( cli: &Cli ) -> Result<bool> {

    let catalog = Catalog::load( &cli.manifest )?;

    let out_dir = cli.out_dir.clone().unwrap_or_else(|| cli.manifest
        .parent()
        .map_or_else(|| PathBuf::from( "generated" ), | parent | parent.join( "generated" )));
    let mode = match cli.check {
        true => OutputMode::Check,
        false => OutputMode::Write,
    };
    let mut output = OutputDir::new( out_dir, mode );
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let summary = drive( &catalog, &catalog, catalog.options(), &mut diagnostics, &mut output )
        .with_context(|| format!( "Failed to deliver generated files to {}", output.root().display() ))?;

    diagnostics.iter().for_each(| diagnostic | eprintln!( "{}\n  --> {}", diagnostic, diagnostic.location() ));
    output.stale().iter().for_each(| path | eprintln!( "out of date: {}", path.display() ));
    output.written().iter().for_each(| path | println!( "{}", path.display() ));

    let failed = summary.has_errors()
        || ( cli.deny_warnings && summary.warnings > 0 )
        || !output.stale().is_empty();
    Ok( !failed )

}
