use std::{
  cmp::Ordering,
  io,
  sync::{Arc, Mutex},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
  api::{
    config::{AlgebraConfig, Verbosity},
    operand::{HookAnswer, Operand, Operation, OrderHook},
    ty::Type,
    type_order::TypeOrder,
  },
  core::{
    algebra::{self as resolve, lattice},
    closure::minimize,
    fixtures::{ambiguous_zoo, random_hierarchy, ty, types, zoo},
    hierarchy::Hierarchy,
  },
};

fn operands(names: &[&str]) -> Vec<Operand> {
  names.iter().map(|name| Operand::from(*name)).collect()
}

// region Scenarios

#[test]
fn bounds_of_bird_and_mammal() {
  let zoo = zoo();

  assert_eq!(zoo.least_upper_bounds(&ty("bird"), &ty("mammal")), types(&["bat"]));
  assert_eq!(zoo.greatest_lower_bounds(&ty("bird"), &ty("mammal")), types(&["animal"]));
  assert!(!zoo.is_tree());
  assert!(zoo.is_deterministic());
  assert_eq!(zoo.get_nondet_pair(), None);
}

#[test]
fn two_incomparable_common_descendants() {
  let zoo = ambiguous_zoo();

  assert_eq!(zoo.lub(&ty("bird"), &ty("mammal")), types(&["bat", "platypus"]));
  assert_eq!(zoo.njoin(&operands(&["bird", "mammal"])), Type::Top);
  assert_eq!(zoo.type_join(&types(&["bird", "mammal"])), Type::Top);
  assert!(!zoo.is_deterministic());
  assert_eq!(zoo.get_nondet_pair(), Some((ty("bird"), ty("mammal"))));
}

#[test]
fn silent_verbosity_still_fails_the_fold() {
  let zoo    = ambiguous_zoo();
  let config = AlgebraConfig { verbosity: Verbosity::Silent, ..AlgebraConfig::default() };
  assert_eq!(lattice::njoin(&zoo, &operands(&["bird", "mammal"]), &config), Type::Top);

  let config = AlgebraConfig { verbosity: Verbosity::WarnWithContext, ..AlgebraConfig::default() };
  assert_eq!(lattice::nmeet(&zoo, &operands(&["bat", "platypus"]), &config), Type::Undefined);
}

// endregion

// region Diagnostics

/// Runs `f` with a subscriber that records WARN and above as plain text, and returns what was recorded.
fn captured_warnings(f: impl FnOnce()) -> String {
  #[derive(Clone, Default)]
  struct Captured(Arc<Mutex<Vec<u8>>>);

  impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  let captured = Captured::default();
  let writer   = captured.clone();
  let subscriber =
      tracing_subscriber::fmt()
          .with_max_level(tracing::Level::WARN)
          .with_ansi(false)
          .with_target(false)
          .without_time()
          .with_writer(move || writer.clone())
          .finish();

  tracing::subscriber::with_default(subscriber, f);
  let bytes = captured.0.lock().unwrap().clone();
  String::from_utf8(bytes).unwrap()
}

#[test]
fn ambiguous_folds_report_per_verbosity() {
  let zoo  = ambiguous_zoo();
  let fold = |verbosity: Verbosity| {
    let config = AlgebraConfig { verbosity, ..AlgebraConfig::default() };
    captured_warnings(|| {
      assert_eq!(lattice::njoin(&zoo, &operands(&["bird", "mammal"]), &config), Type::Top);
    })
  };

  let warned = fold(Verbosity::Warn);
  assert_eq!(warned.lines().count(), 1, "{}", warned);
  assert!(warned.contains("WARN"));
  assert!(warned.contains("least_upper_bounds of bird and mammal is not unique"));
  assert!(!warned.contains("candidates"));

  let detailed = fold(Verbosity::WarnWithContext);
  assert_eq!(detailed.lines().count(), 1, "{}", detailed);
  assert!(detailed.contains("candidates [bat, platypus] while folding [bird, mammal]"));

  assert_eq!(fold(Verbosity::Silent), "");

  // Meets report the same way.
  let config = AlgebraConfig::default();
  let meet   = captured_warnings(|| {
    assert_eq!(lattice::nmeet(&zoo, &operands(&["bat", "platypus"]), &config), Type::Undefined);
  });
  assert!(meet.contains("greatest_lower_bounds of bat and platypus is not unique"));

  // A step with no bound fails without a report.
  let mut forest = zoo.clone();
  forest.add("rock", ["BOTTOM"]);
  let quiet = captured_warnings(|| {
    assert_eq!(lattice::njoin(&forest, &operands(&["bird", "rock"]), &config), Type::Top);
  });
  assert_eq!(quiet, "");
}

// endregion

// region Binary operations

#[test]
fn relations_between_members() {
  let zoo = zoo();

  assert!(zoo.subsumes(&ty("animal"), &ty("bat")));
  assert!(zoo.properly_subsumes(&ty("animal"), &ty("bat")));
  assert!(!zoo.subsumes(&ty("bat"), &ty("animal")));
  assert!(zoo.extends(&ty("bat"), &ty("animal")));
  assert!(zoo.properly_extends(&ty("bat"), &ty("BOTTOM")));
  assert!(!zoo.subsumes(&ty("bird"), &ty("mammal")));

  assert!(zoo.le(&ty("bird"), &ty("bird")));
  assert!(!zoo.lt(&ty("bird"), &ty("bird")));
  assert!(zoo.ge(&ty("bat"), &ty("mammal")));
  assert!(zoo.gt(&ty("bat"), &ty("mammal")));
}

#[test]
fn non_members_fail_the_guard() {
  let zoo = zoo();

  assert!(!zoo.subsumes(&ty("animal"), &ty("whale")));
  assert!(!zoo.subsumes(&ty("whale"), &ty("animal")));
  assert!(zoo.lub(&ty("whale"), &ty("bird")).is_empty());
  assert!(zoo.glb(&ty("whale"), &ty("bird")).is_empty());
  // Identical operands are decided before the guard.
  assert!(zoo.subsumes(&ty("whale"), &ty("whale")));
}

#[test]
fn bounds_of_comparable_types() {
  let zoo = zoo();

  assert_eq!(zoo.lub(&ty("animal"), &ty("bird")), types(&["bird"]));
  assert_eq!(zoo.glb(&ty("animal"), &ty("bird")), types(&["animal"]));
  assert_eq!(zoo.lub(&ty("BOTTOM"), &ty("bat")), types(&["bat"]));
  assert_eq!(zoo.glb(&ty("bat"), &ty("bat")), types(&["bat"]));
}

#[test]
fn sentinel_rules_hold_for_every_type() {
  let hierarchy = random_hierarchy(7, 15);
  let mut all   = hierarchy.types();
  all.extend([Type::Top, Type::Undefined, ty("outsider")]);

  for t in all.iter() {
    assert!(hierarchy.subsumes(t, t));
    assert!(!hierarchy.properly_subsumes(t, t));

    assert!(hierarchy.subsumes(&Type::Undefined, t));
    assert_eq!(hierarchy.subsumes(t, &Type::Undefined), t.is_undefined());
    assert!(hierarchy.subsumes(t, &Type::Top));
    assert_eq!(hierarchy.subsumes(&Type::Top, t), t.is_top());

    assert_eq!(hierarchy.lub(&Type::Undefined, t), vec![t.clone()]);
    assert_eq!(hierarchy.lub(t, &Type::Top), vec![Type::Top]);
    assert_eq!(hierarchy.glb(t, &Type::Undefined), vec![Type::Undefined]);
    assert_eq!(hierarchy.glb(&Type::Top, t), vec![t.clone()]);
  }
}

#[test]
fn subsumption_agrees_with_closures() {
  for seed in 30..33 {
    let hierarchy = random_hierarchy(seed, 20);
    for t in hierarchy.types() {
      for ancestor in hierarchy.ancestors(&t) {
        assert!(hierarchy.descendants(&ancestor).contains(&t));
        assert!(hierarchy.properly_subsumes(&ancestor, &t));
      }
      for descendant in hierarchy.descendants(&t) {
        assert!(hierarchy.ancestors(&descendant).contains(&t));
      }
    }
  }
}

#[test]
fn removal_preserves_the_order_among_survivors() {
  for seed in 40..44 {
    let original = random_hierarchy(seed, 14);

    for removed in original.types().into_iter().filter(|t| !original.is_root(t)) {
      let mut pruned = original.clone();
      pruned.remove([removed.to_string()]);

      let survivors = pruned.types();
      assert_eq!(survivors.len() + 1, original.size());
      for u in survivors.iter() {
        for v in survivors.iter() {
          assert_eq!(
            pruned.subsumes(u, v),
            original.subsumes(u, v),
            "subsumes({}, {}) after removing {}",
            u,
            v,
            removed
          );
        }
      }
    }
  }
}

#[test]
fn hull_reduction_is_idempotent() {
  let hierarchy = random_hierarchy(50, 20);
  let all       = hierarchy.types();
  let mut rng   = StdRng::seed_from_u64(50);

  for _ in 0..20 {
    let mut subset: Vec<Type> = (0..6).map(|_| all[rng.gen_range(0..all.len())].clone()).collect();
    minimize(&mut subset, |general, specific| hierarchy.properly_subsumes(general, specific));
    let once = subset.clone();
    minimize(&mut subset, |general, specific| hierarchy.properly_subsumes(general, specific));
    assert_eq!(subset, once);

    assert_eq!(hierarchy.max(&hierarchy.max(&once)), hierarchy.max(&once));
  }
}

#[test]
fn trees_are_deterministic() {
  let mut rng = StdRng::seed_from_u64(60);

  for _ in 0..5 {
    let mut tree = Hierarchy::new("root");
    for i in 0..25 {
      let parent = if i == 0 { "root".to_string() } else { format!("n{}", rng.gen_range(0..i)) };
      tree.add(format!("n{}", i), [parent]);
    }
    assert!(tree.is_tree());
    assert!(tree.is_deterministic());
  }

  let mut zoo = zoo();
  zoo.remove(["bat"]);
  assert!(zoo.is_tree());
}

// endregion

// region Folds

#[test]
fn joins_and_meets() {
  let zoo = zoo();

  assert_eq!(zoo.njoin(&[]), Type::Undefined);
  assert_eq!(zoo.nmeet(&[]), Type::Top);
  assert_eq!(zoo.njoin(&operands(&["bird"])), ty("bird"));
  assert_eq!(zoo.njoin(&operands(&["bird", "mammal"])), ty("bat"));
  assert_eq!(zoo.njoin(&operands(&["bird", "mammal", "animal"])), ty("bat"));
  assert_eq!(zoo.nmeet(&operands(&["bat", "bird", "mammal"])), ty("animal"));

  // No common descendant.
  let mut zoo = zoo;
  zoo.add("fish", ["animal"]);
  assert_eq!(zoo.njoin(&operands(&["fish", "bird"])), Type::Top);
  assert_eq!(zoo.nmeet(&operands(&["fish", "bat"])), ty("animal"));
  assert_eq!(zoo.njoin(&operands(&["fish", "whale"])), Type::Top);
  assert_eq!(zoo.nmeet(&operands(&["fish", "whale"])), Type::Undefined);
}

#[test]
fn folds_with_sentinels() {
  let zoo = zoo();

  assert_eq!(zoo.njoin(&[Type::Undefined.into(), "bird".into()]), ty("bird"));
  assert_eq!(zoo.njoin(&["bird".into(), Type::Top.into(), "mammal".into()]), Type::Top);
  assert_eq!(zoo.nmeet(&[Type::Top.into(), "bird".into()]), ty("bird"));
  assert_eq!(zoo.nmeet(&["bird".into(), Type::Undefined.into()]), Type::Undefined);
}

#[test]
fn type_folds_go_straight_to_lookup() {
  let zoo = zoo();

  assert_eq!(zoo.type_join(&[]), Type::Undefined);
  assert_eq!(zoo.type_meet(&[]), Type::Top);
  assert_eq!(zoo.type_join(&types(&["bird", "mammal"])), ty("bat"));
  assert_eq!(zoo.type_meet(&types(&["bird", "mammal"])), ty("animal"));
  assert_eq!(zoo.type_join(&types(&["bird", "bird"])), ty("bird"));
  assert_eq!(zoo.type_meet(&types(&["bat", "whale"])), Type::Undefined);
}

// endregion

// region Hooks

/// Claims to subsume every type whose name starts with "b".
fn b_types() -> Operand {
  Operand::predicate(|operation, other| {
    match operation {
      Operation::Subsumes => {
        let answer = other.as_type().and_then(Type::name).is_some_and(|name| name.starts_with('b'));
        Some(HookAnswer::Relation(answer))
      }
      _ => None,
    }
  })
}

struct Flier;

impl OrderHook for Flier {
  fn least_upper_bounds(&self, _other: &Operand) -> Option<Vec<Type>> {
    Some(vec![Type::from("bat"), Type::from("bat")])
  }

  fn subsumes(&self, _other: &Operand) -> Option<bool> {
    None
  }

  fn describe(&self) -> String {
    "flier".to_string()
  }
}

#[test]
fn predicates_answer_without_a_hierarchy() {
  let config = AlgebraConfig::default();

  assert!(resolve::subsumes(&b_types(), &"bat".into(), &config));
  assert!(!resolve::subsumes(&b_types(), &"mammal".into(), &config));
  // Asked from the other side, the hook gets the converse question.
  assert!(resolve::extends(&"bird".into(), &b_types(), &config));
  // Nothing to say about proper subsumption; without a hierarchy that means false.
  assert!(!resolve::properly_subsumes(&b_types(), &"bat".into(), &config));
}

#[test]
fn hooks_can_be_switched_off() {
  let config = AlgebraConfig { user_hooks: false, ..AlgebraConfig::default() };

  assert!(!resolve::subsumes(&b_types(), &"bat".into(), &config));
  assert!(resolve::least_upper_bounds(&Operand::object(Flier), &"bird".into(), &config).is_empty());
  // The reserved values do not need hooks.
  assert!(resolve::subsumes(&Type::Undefined.into(), &b_types(), &config));
  assert!(!resolve::subsumes(&b_types(), &Type::Undefined.into(), &config));
}

#[test]
fn hook_bounds_are_normalized() {
  let config = AlgebraConfig::default();
  let flier  = Operand::object(Flier);

  assert_eq!(resolve::least_upper_bounds(&flier, &"mammal".into(), &config), types(&["bat"]));
  assert_eq!(resolve::least_upper_bounds(&"mammal".into(), &flier, &config), types(&["bat"]));
  assert_eq!(resolve::least_upper_bounds(&flier, &Type::Top.into(), &config), vec![Type::Top]);
  assert!(resolve::greatest_lower_bounds(&flier, &"mammal".into(), &config).is_empty());
  assert_eq!(format!("{:?}", flier), "flier");
}

#[test]
fn declining_hooks_fall_through_to_lookup() {
  let zoo    = zoo();
  let config = AlgebraConfig::default();

  // A hook answering with the wrong shape counts as declining.
  let confused = Operand::predicate(|_, _| Some(HookAnswer::Bounds(vec![Type::Top])));
  assert!(!resolve::resolve_relation(&zoo, Operation::Subsumes, &confused, &"bat".into(), &config));

  // Two plain types reach graph lookup.
  assert!(zoo.resolve_subsumes(&"animal".into(), &"bat".into()));
  assert!(zoo.resolve_properly_extends(&"bat".into(), &"animal".into()));
  assert!(!zoo.resolve_properly_subsumes(&"bat".into(), &"bat".into()));
  assert!(zoo.resolve_extends(&"bat".into(), &"bat".into()));
  assert_eq!(zoo.resolve_least_upper_bounds(&"bird".into(), &"mammal".into()), types(&["bat"]));
  assert_eq!(zoo.resolve_greatest_lower_bounds(&"bird".into(), &"mammal".into()), types(&["animal"]));
}

#[test]
fn hooks_take_part_in_folds() {
  let zoo = zoo();
  assert_eq!(zoo.njoin(&["bird".into(), Operand::object(Flier)]), ty("bat"));
  assert_eq!(zoo.nmeet(&["bird".into(), Operand::object(Flier)]), Type::Undefined);
}

// endregion

// region Sorting

#[test]
fn compare_orders_general_first() {
  let zoo = zoo();

  assert_eq!(zoo.compare(&ty("animal"), &ty("bat")), Some(Ordering::Less));
  assert_eq!(zoo.compare(&ty("bat"), &ty("animal")), Some(Ordering::Greater));
  assert_eq!(zoo.compare(&ty("bird"), &ty("bird")), Some(Ordering::Equal));
  assert_eq!(zoo.compare(&ty("bird"), &ty("mammal")), None);
  assert_eq!(zoo.compare(&Type::Undefined, &ty("bird")), Some(Ordering::Less));
  assert_eq!(zoo.compare(&Type::Top, &ty("bird")), Some(Ordering::Greater));
  assert_eq!(zoo.compare(&ty("whale"), &ty("bird")), None);
}

#[test]
fn min_and_max() {
  let zoo = zoo();
  let all = types(&["bat", "bird", "mammal", "animal", "bird"]);

  assert_eq!(zoo.min(&all), types(&["animal"]));
  assert_eq!(zoo.max(&all), types(&["bat"]));
  assert_eq!(zoo.min(&types(&["mammal", "bird"])), types(&["bird", "mammal"]));
  assert!(zoo.min(&[]).is_empty());
}

#[test]
fn subsort_is_topological_and_stable() {
  let zoo = zoo();

  assert_eq!(
    zoo.subsort(&types(&["bat", "mammal", "bird", "animal", "bat"])),
    types(&["animal", "mammal", "bird", "bat"])
  );
  assert_eq!(
    zoo.subsort(&[Type::Top, ty("bird"), Type::Undefined]),
    vec![Type::Undefined, ty("bird"), Type::Top]
  );
}

#[test]
fn subsort_respects_subsumption_on_random_input() {
  let hierarchy = random_hierarchy(70, 18);
  let mut all   = hierarchy.types();
  all.reverse();

  let sorted = hierarchy.subsort(&all);
  assert_eq!(sorted.len(), all.len());
  for (i, earlier) in sorted.iter().enumerate() {
    for later in sorted[i + 1..].iter() {
      assert!(!hierarchy.properly_subsumes(later, earlier), "{} sorted before {}", earlier, later);
    }
  }
}

#[test]
fn stratasort_groups_into_antichains() {
  let zoo = zoo();

  let strata = zoo.stratasort(&[ty("bat"), ty("whale"), ty("bird"), ty("BOTTOM"), ty("mammal"), Type::Top, ty("bat")]);
  assert_eq!(
    strata,
    vec![
      types(&["BOTTOM"]),
      types(&["bird", "mammal"]),
      types(&["bat"]),
      vec![ty("whale"), Type::Top],
    ]
  );

  assert!(zoo.stratasort(&[]).is_empty());
}

#[test]
fn strata_of_random_hierarchies_are_antichains() {
  let hierarchy = random_hierarchy(80, 25);
  let strata    = hierarchy.stratasort(&hierarchy.types());

  assert_eq!(strata.iter().map(Vec::len).sum::<usize>(), hierarchy.size());
  for stratum in strata.iter() {
    for left in stratum.iter() {
      for right in stratum.iter() {
        assert!(left == right || hierarchy.compare(left, right).is_none());
      }
    }
  }
}

// endregion
