//! Changes the process-wide configuration, so it runs in its own test binary.

use typelattice::{
  global_config,
  update_global_config,
  Hierarchy,
  IString,
  Type,
  TypeOrder,
};

#[test]
fn configured_spellings_are_used_throughout() {
  update_global_config(|config| {
    config.sentinels.top       = IString::from("CONTRADICTION");
    config.sentinels.undefined = IString::from("ANY");
  });

  assert_eq!(Type::Top.to_string(), "CONTRADICTION");
  assert_eq!(format!("{:?}", Type::Undefined), "ANY");
  assert_eq!(global_config().parse_type("CONTRADICTION"), Type::Top);

  let mut zoo = Hierarchy::default();
  zoo.add("animal", ["BOTTOM"])
     .add("bird", ["animal"])
     .add("mammal", ["animal"])
     .add("bat", ["bird", "mammal"])
     .add("platypus", ["bird", "mammal"]);

  let join = zoo.type_join(&[Type::from("bird"), Type::from("mammal")]);
  assert_eq!(join.to_string(), "CONTRADICTION");

  // The new spellings are reserved; the old ones are ordinary names again.
  zoo.add("ANY", ["animal"]).add("TOP", ["animal"]);
  assert!(!zoo.has_type(&Type::from("ANY")));
  assert!(zoo.has_type(&Type::from("TOP")));
}
