//! Traversal of executable documents, driving several visitors in one pass.

use super::Definition;
use super::Document;
use super::Field;
use super::FragmentDefinition;
use super::FragmentSpread;
use super::InlineFragment;
use super::OperationDefinition;
use super::Selection;
use crate::validation::ValidationContext;
use crate::Node;

/// Returned by visitor methods to control traversal below the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitControl {
    /// Visit child nodes as usual
    #[default]
    Continue,
    /// Don't visit any child of this node. Other visitors are not affected.
    SkipChildren,
}

/// Callbacks for nodes of an executable document.
///
/// Every method has a default implementation that does nothing and continues.
pub trait Visitor {
    fn enter_document(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _document: &Document,
    ) -> VisitControl {
        VisitControl::Continue
    }

    /// Called after every definition of the document was visited
    fn leave_document(&mut self, _context: &mut ValidationContext<'_>, _document: &Document) {}

    fn enter_operation_definition(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _operation: &Node<OperationDefinition>,
    ) -> VisitControl {
        VisitControl::Continue
    }

    fn enter_fragment_definition(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _fragment: &Node<FragmentDefinition>,
    ) -> VisitControl {
        VisitControl::Continue
    }

    fn enter_field(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _field: &Node<Field>,
    ) -> VisitControl {
        VisitControl::Continue
    }

    fn enter_fragment_spread(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _spread: &Node<FragmentSpread>,
    ) -> VisitControl {
        VisitControl::Continue
    }

    fn enter_inline_fragment(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _inline: &Node<InlineFragment>,
    ) -> VisitControl {
        VisitControl::Continue
    }
}

/// Visit `document` depth-first with every visitor in turn at each node.
///
/// Type system definitions in the document are not visited.
pub(crate) fn walk(
    document: &Document,
    context: &mut ValidationContext<'_>,
    visitors: Vec<Box<dyn Visitor>>,
) {
    let mut walk = ParallelWalk {
        slots: visitors
            .into_iter()
            .map(|visitor| Slot {
                visitor,
                skipped_at: None,
            })
            .collect(),
        depth: 0,
    };
    walk.document(document, context)
}

struct Slot {
    visitor: Box<dyn Visitor>,
    /// Depth of the node whose children this visitor asked to skip
    skipped_at: Option<usize>,
}

struct ParallelWalk {
    slots: Vec<Slot>,
    depth: usize,
}

impl ParallelWalk {
    fn enter<'c>(
        &mut self,
        context: &mut ValidationContext<'c>,
        mut visit: impl FnMut(&mut Box<dyn Visitor>, &mut ValidationContext<'c>) -> VisitControl,
    ) {
        self.depth += 1;
        for slot in &mut self.slots {
            if slot.skipped_at.is_some() {
                continue;
            }
            if visit(&mut slot.visitor, context) == VisitControl::SkipChildren {
                slot.skipped_at = Some(self.depth);
            }
        }
    }

    fn leave(&mut self) {
        for slot in &mut self.slots {
            if slot.skipped_at == Some(self.depth) {
                slot.skipped_at = None;
            }
        }
        self.depth -= 1;
    }

    fn document(&mut self, document: &Document, context: &mut ValidationContext<'_>) {
        self.enter(context, |visitor, context| {
            visitor.enter_document(context, document)
        });
        for definition in &document.definitions {
            match definition {
                Definition::OperationDefinition(operation) => {
                    self.enter(context, |visitor, context| {
                        visitor.enter_operation_definition(context, operation)
                    });
                    self.selection_set(&operation.selection_set, context);
                    self.leave();
                }
                Definition::FragmentDefinition(fragment) => {
                    self.enter(context, |visitor, context| {
                        visitor.enter_fragment_definition(context, fragment)
                    });
                    self.selection_set(&fragment.selection_set, context);
                    self.leave();
                }
                _ => {}
            }
        }
        self.leave();
        for slot in &mut self.slots {
            slot.visitor.leave_document(context, document);
        }
    }

    fn selection_set(&mut self, selections: &[Selection], context: &mut ValidationContext<'_>) {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    self.enter(context, |visitor, context| {
                        visitor.enter_field(context, field)
                    });
                    self.selection_set(&field.selection_set, context);
                    self.leave();
                }
                Selection::FragmentSpread(spread) => {
                    self.enter(context, |visitor, context| {
                        visitor.enter_fragment_spread(context, spread)
                    });
                    self.leave();
                }
                Selection::InlineFragment(inline) => {
                    self.enter(context, |visitor, context| {
                        visitor.enter_inline_fragment(context, inline)
                    });
                    self.selection_set(&inline.selection_set, context);
                    self.leave();
                }
            }
        }
    }
}
