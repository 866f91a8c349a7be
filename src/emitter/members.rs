use crate::contract::{ Accessibility, Member, Method, MethodKind, Parameter, Property, TypeParameter };
use crate::utils::escape_keyword ;
use super::writer::SourceWriter ;



/// Whether `member` gets a forwarding counterpart. Accessors are covered by
/// their property; operators, conversions, constructors and static members
/// cannot be reached through an instance.
pub fn is_forwarded( member: &Member ) -> bool {
	match member {
		Member::Method( method ) => method.kind() == MethodKind::Ordinary,
		Member::Property( _ ) => true,
	}
}

/// Writes the forwarding counterpart of `member`, delegating to the field `slot`.
/// Members that are not forwarded are skipped.
pub fn write_member( writer: &mut SourceWriter, slot: &str, member: &Member ) {
	match member {
		Member::Method( method ) if method.kind() != MethodKind::Ordinary => {}
		Member::Method( method ) => write_method( writer, slot, method ),
		Member::Property( property ) => write_property( writer, slot, property ),
	}
}

fn write_method( writer: &mut SourceWriter, slot: &str, method: &Method ) {

	let name = escape_keyword( method.name() );
	let generics = type_parameter_list( method.type_parameters() );
	let declared = method.parameters().iter().map( declare_parameter ).collect::<Vec<_>>().join( ", " );
	let forwarded = method.parameters().iter().map( forward_argument ).collect::<Vec<_>>().join( ", " );

	let signature = format!(
		"{} {} {}{}({}){}",
		method.accessibility(),
		method.returns().unwrap_or( "void" ),
		name,
		generics,
		declared,
		constraint_clauses( method.type_parameters() ),
	);
	let call = format!( "this.{}.{}{}({});", slot, name, generics, forwarded );

	writer.scoped( signature, | writer | match method.is_void() {
		true => writer.line( call ),
		false => writer.line( format!( "return {}", call )),
	});

}

fn write_property( writer: &mut SourceWriter, slot: &str, property: &Property ) {

	let name = escape_keyword( property.name() );
	let modifier = | accessor: Accessibility | match accessor.is_narrower_than( property.accessibility() ) {
		true => format!( "{} ", accessor ),
		false => String::new(),
	};

	writer.scoped( format!( "{} {} {}", property.accessibility(), property.ty(), name ), | writer | {
		if let Some( getter ) = property.getter() {
			writer.line( format!( "{}get => this.{}.{};", modifier( getter ), slot, name ));
		}
		if let Some( setter ) = property.setter() {
			writer.line( format!( "{}set => this.{}.{} = value;", modifier( setter ), slot, name ));
		}
	});

}

fn type_parameter_list( parameters: &[TypeParameter] ) -> String {
	match parameters.is_empty() {
		true => String::new(),
		false => format!( "<{}>", parameters.iter().map( TypeParameter::name ).collect::<Vec<_>>().join( ", " )),
	}
}

fn constraint_clauses( parameters: &[TypeParameter] ) -> String {
	parameters.iter()
		.filter(| parameter | !parameter.constraints().is_empty() )
		.map(| parameter | format!( " where {} : {}", parameter.name(), parameter.constraints().join( ", " )))
		.collect()
}

fn declare_parameter( parameter: &Parameter ) -> String {
	let modifier = parameter.pass_by().declaration_keyword().map(| keyword | format!( "{} ", keyword )).unwrap_or_default();
	let default = parameter.default().map(| value | format!( " = {}", value )).unwrap_or_default();
	format!( "{}{} {}{}", modifier, parameter.ty(), escape_keyword( parameter.name() ), default )
}

fn forward_argument( parameter: &Parameter ) -> String {
	let modifier = parameter.pass_by().call_keyword().map(| keyword | format!( "{} ", keyword )).unwrap_or_default();
	format!( "{}{}", modifier, escape_keyword( parameter.name() ))
}
