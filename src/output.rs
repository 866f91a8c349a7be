//! Artifact delivery into a directory.

use std::path::{ Path, PathBuf };
use thiserror::Error ;
use tracing::{ debug, warn };

use crate::pipeline::{ Artifact, Delivery };



/// Extension appended to each artifact's hint name.
pub const EXTENSION: &str = "g.cs" ;

#[derive( Debug, Error )]
pub enum OutputError {
    #[error( "Failed to create output directory {path}: {source}" )]
    CreateDir { path: PathBuf, source: std::io::Error },
    #[error( "Failed to write {path}: {source}" )]
    Write { path: PathBuf, source: std::io::Error },
    #[error( "Failed to read {path}: {source}" )]
    Read { path: PathBuf, source: std::io::Error },
}

/// What [`OutputDir`] does with each artifact.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum OutputMode {
    /// Write every artifact, replacing files whose content differs.
    Write,
    /// Write nothing, record artifacts whose file is missing or differs.
    Check,
}

/// Delivers artifacts as `<hint name>.g.cs` files in one directory.
#[derive( Debug )]
pub struct OutputDir {
    root: PathBuf,
    mode: OutputMode,
    written: Vec<PathBuf>,
    stale: Vec<PathBuf>,
}

impl OutputDir {

    pub fn new( root: impl Into<PathBuf>, mode: OutputMode ) -> Self {
        Self { root: root.into(), mode, written: Vec::new(), stale: Vec::new() }
    }

    #[inline] pub fn root( &self ) -> &Path { &self.root }
    /// Files written in [`OutputMode::Write`].
    #[inline] pub fn written( &self ) -> &[PathBuf] { &self.written }
    /// Files found missing or out of date in [`OutputMode::Check`].
    #[inline] pub fn stale( &self ) -> &[PathBuf] { &self.stale }

    /// Path an artifact is delivered to.
    pub fn path_of( &self, artifact: &Artifact ) -> PathBuf {
        let file_name = artifact.hint_name().replace( ['/', '\\', '<', '>', ':', '"', '|', '?', '*'], "_" );
        self.root.join( format!( "{}.{}", file_name, EXTENSION ))
    }

    fn existing( path: &Path ) -> Result<Option<String>, OutputError> {
        match std::fs::read_to_string( path ) {
            Ok( text ) => Ok( Some( text )),
            Err( err ) if err.kind() == std::io::ErrorKind::NotFound => Ok( None ),
            Err( source ) => Err( OutputError::Read { path: path.to_path_buf(), source }),
        }
    }

}

impl Delivery for OutputDir {

    type Error = OutputError ;

    fn deliver( &mut self, artifact: Artifact ) -> Result<(), Self::Error> {

        let path = self.path_of( &artifact );
        let up_to_date = Self::existing( &path )?.is_some_and(| existing | existing == artifact.text() );

        match ( self.mode, up_to_date ) {
            ( _, true ) => debug!( path = %path.display(), "up to date" ),
            ( OutputMode::Check, false ) => {
                warn!( path = %path.display(), "out of date" );
                self.stale.push( path );
            }
            ( OutputMode::Write, false ) => {
                std::fs::create_dir_all( &self.root )
                    .map_err(| source | OutputError::CreateDir { path: self.root.clone(), source })?;
                std::fs::write( &path, artifact.text() )
                    .map_err(| source | OutputError::Write { path: path.clone(), source })?;
                debug!( path = %path.display(), "written" );
                self.written.push( path );
            }
        }

        Ok(())

    }

}
