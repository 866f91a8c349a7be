/// Line oriented text builder with brace scoped indentation.
pub struct SourceWriter {
	text: String,
	unit: String,
	depth: usize,
	// a blank line is owed before the next line written at this depth
	pending_separator: bool,
}

impl SourceWriter {

	pub fn new( unit: impl Into<String> ) -> Self {
		Self { text: String::new(), unit: unit.into(), depth: 0, pending_separator: false }
	}

	/// Writes one indented line.
	pub fn line( &mut self, line: impl AsRef<str> ) {
		if self.pending_separator {
			self.text.push( '\n' );
			self.pending_separator = false ;
		}
		let line = line.as_ref();
		if !line.is_empty() {
			( 0..self.depth ).for_each(| _ | self.text.push_str( &self.unit ));
			self.text.push_str( line );
		}
		self.text.push( '\n' );
	}

	/// Writes a line without indentation, for preprocessor directives.
	pub fn raw_line( &mut self, line: impl AsRef<str> ) {
		self.depth_zero(| writer | writer.line( line ));
	}

	/// Requests a blank line before the next line, unless a brace closes first.
	pub fn separator( &mut self ) {
		if !self.text.is_empty() { self.pending_separator = true }
	}

	/// Writes `header`, then the body one level deeper between braces.
	pub fn scoped( &mut self, header: impl AsRef<str>, body: impl FnOnce( &mut Self )) {
		self.line( header );
		self.line( "{" );
		self.depth += 1 ;
		body( self );
		self.depth -= 1 ;
		self.pending_separator = false ;
		self.line( "}" );
	}

	pub fn finish( self ) -> String { self.text }

	fn depth_zero( &mut self, write: impl FnOnce( &mut Self )) {
		let depth = std::mem::replace( &mut self.depth, 0 );
		write( self );
		self.depth = depth ;
	}

}
