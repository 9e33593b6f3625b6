/*!

N-ary joins and meets, and determinism.

A join folds least upper bounds from the left, starting from `Undefined`, the identity of the join. A meet folds
greatest lower bounds starting from `Top`. Each step must produce exactly one bound. A step with no bound means the
operands have no common solution, and a step with several means the result would depend on an arbitrary choice;
either way the fold stops with the failure value (`Top` for joins, `Undefined` for meets). Several bounds are also
reported, with as much detail as `AlgebraConfig::verbosity` asks for.

*/

use crate::{
  abstractions::join_string,
  api::{
    config::{AlgebraConfig, Verbosity},
    operand::{Operand, Operation},
    ty::Type,
    type_order::TypeOrder,
  },
  core::{algebra::resolve_bounds, hierarchy::Hierarchy},
  warning,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Fold {
  Join,
  Meet,
}

impl Fold {
  fn identity(self) -> Type {
    match self {
      Fold::Join => Type::Undefined,
      Fold::Meet => Type::Top,
    }
  }

  fn failure(self) -> Type {
    match self {
      Fold::Join => Type::Top,
      Fold::Meet => Type::Undefined,
    }
  }

  fn operation(self) -> Operation {
    match self {
      Fold::Join => Operation::LeastUpperBounds,
      Fold::Meet => Operation::GreatestLowerBounds,
    }
  }
}

pub(crate) fn njoin<H: TypeOrder + ?Sized>(order: &H, operands: &[Operand], config: &AlgebraConfig) -> Type {
  fold(Fold::Join, operands, config, |accumulated, operand| {
    resolve_bounds(order, Operation::LeastUpperBounds, &Operand::Type(accumulated.clone()), operand, config)
  })
}

pub(crate) fn nmeet<H: TypeOrder + ?Sized>(order: &H, operands: &[Operand], config: &AlgebraConfig) -> Type {
  fold(Fold::Meet, operands, config, |accumulated, operand| {
    resolve_bounds(order, Operation::GreatestLowerBounds, &Operand::Type(accumulated.clone()), operand, config)
  })
}

pub(crate) fn type_join<H: TypeOrder + ?Sized>(order: &H, types: &[Type], config: &AlgebraConfig) -> Type {
  let operands: Vec<Operand> = types.iter().map(Operand::from).collect();
  fold(Fold::Join, &operands, config, |accumulated, operand| {
    match (accumulated, operand.as_type()) {
      (Type::Undefined, Some(ty)) => vec![ty.clone()],
      (accumulated, Some(ty)) if accumulated == ty => vec![ty.clone()],
      (accumulated, Some(ty)) => order.lookup_least_upper_bounds(accumulated, ty),
      (_, None) => Vec::new(),
    }
  })
}

pub(crate) fn type_meet<H: TypeOrder + ?Sized>(order: &H, types: &[Type], config: &AlgebraConfig) -> Type {
  let operands: Vec<Operand> = types.iter().map(Operand::from).collect();
  fold(Fold::Meet, &operands, config, |accumulated, operand| {
    match (accumulated, operand.as_type()) {
      (Type::Top, Some(ty)) => vec![ty.clone()],
      (accumulated, Some(ty)) if accumulated == ty => vec![ty.clone()],
      (accumulated, Some(ty)) => order.lookup_greatest_lower_bounds(accumulated, ty),
      (_, None) => Vec::new(),
    }
  })
}

fn fold(
  kind    : Fold,
  operands: &[Operand],
  config  : &AlgebraConfig,
  mut step: impl FnMut(&Type, &Operand) -> Vec<Type>,
) -> Type {
  let mut accumulated = kind.identity();

  for operand in operands {
    let mut bounds = step(&accumulated, operand);
    match bounds.len() {
      0 => return kind.failure(),
      1 => {
        if let Some(bound) = bounds.pop() {
          accumulated = bound;
        }
      }
      _ => {
        report_nondeterminism(kind.operation(), &accumulated, operand, &bounds, operands, config);
        return kind.failure();
      }
    }
  }

  accumulated
}

fn report_nondeterminism(
  operation: Operation,
  left     : &Type,
  right    : &Operand,
  bounds   : &[Type],
  operands : &[Operand],
  config   : &AlgebraConfig,
) {
  let render_operand = |operand: &Operand| {
    match operand.as_type() {
      Some(ty) => config.render(ty).to_string(),
      None     => format!("{:?}", operand),
    }
  };

  match config.verbosity {
    Verbosity::Silent => {}

    Verbosity::Warn => {
      warning!(
        1,
        "{} of {} and {} is not unique",
        operation.name(),
        config.render(left),
        render_operand(right)
      );
    }

    Verbosity::WarnWithContext => {
      warning!(
        1,
        "{} of {} and {} is not unique: candidates [{}] while folding [{}]",
        operation.name(),
        config.render(left),
        render_operand(right),
        join_string(bounds.iter().map(|ty| config.render(ty)), ", "),
        join_string(operands.iter().map(render_operand), ", ")
      );
    }
  }
}

pub(crate) fn is_tree(hierarchy: &Hierarchy) -> bool {
  hierarchy
      .types()
      .iter()
      .all(|ty| hierarchy.parent_set(ty).map_or(0, |parents| parents.len()) <= 1)
}

pub(crate) fn get_nondet_pair<H: TypeOrder + ?Sized>(order: &H) -> Option<(Type, Type)> {
  if is_tree(order.hierarchy()) {
    return None;
  }

  let types = order.types();
  for (i, left) in types.iter().enumerate() {
    for right in types[i + 1..].iter() {
      if order.lookup_least_upper_bounds(left, right).len() > 1 {
        return Some((left.clone(), right.clone()));
      }
    }
  }
  None
}
