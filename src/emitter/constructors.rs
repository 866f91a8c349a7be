use crate::binder::{ ConstructorPlan, SlotSet };
use super::writer::SourceWriter ;



/// Writes one constructor for `plan`. Each parameter is stored into every slot
/// it is bound to; a parameter bound to nothing is declared and ignored.
pub fn write_constructor( writer: &mut SourceWriter, type_name: &str, slots: &SlotSet, plan: &ConstructorPlan ) {

	let parameters = plan.parameters().iter()
		.map(| parameter | format!( "{} {}", parameter.ty().qualified(), parameter.name() ))
		.collect::<Vec<_>>()
		.join( ", " );

	writer.scoped( format!( "public {}({})", type_name, parameters ), | writer | {
		plan.parameters().iter()
			.flat_map(| parameter | parameter.slots().iter().map( move | index | ( *index, parameter.name() )))
			.filter_map(|( index, parameter )| slots.get( index ).map(| slot | ( slot.name(), parameter )))
			.for_each(|( slot, parameter )| writer.line( format!( "this.{} = {};", slot, parameter )));
	});

}
