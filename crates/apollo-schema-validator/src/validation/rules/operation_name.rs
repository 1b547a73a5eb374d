use crate::ast::visitor::VisitControl;
use crate::ast::visitor::Visitor;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::validation::ValidationContext;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Operation names must be unique within a document.
///
/// Anonymous operations are not considered.
pub fn unique_operation_names(_context: &ValidationContext<'_>) -> Box<dyn Visitor> {
    Box::<UniqueOperationNames>::default()
}

#[derive(Default)]
struct UniqueOperationNames {
    known: HashMap<Name, Option<NodeLocation>>,
}

impl Visitor for UniqueOperationNames {
    fn enter_operation_definition(
        &mut self,
        context: &mut ValidationContext<'_>,
        operation: &Node<OperationDefinition>,
    ) -> VisitControl {
        if let Some(name) = &operation.name {
            match self.known.entry(name.clone()) {
                Entry::Occupied(original) => context.report_error(
                    format!("There can be only one operation named \"{name}\"."),
                    [*original.get(), name.location()].into_iter().flatten(),
                ),
                Entry::Vacant(entry) => {
                    entry.insert(name.location());
                }
            }
        }
        VisitControl::SkipChildren
    }

    fn enter_fragment_definition(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _fragment: &Node<FragmentDefinition>,
    ) -> VisitControl {
        VisitControl::SkipChildren
    }
}
