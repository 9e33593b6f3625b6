/*!

Builds a small animal hierarchy and prints what the algebra says about it, first from the graph, then through the
compiled and caching layers.

*/

use typelattice::{
  log::set_global_logging_threshold,
  CachingHierarchy,
  CompiledHierarchy,
  HookAnswer,
  Hierarchy,
  Operand,
  Operation,
  Type,
  TypeOrder,
};

fn show(types: &[Type]) -> String {
  let names: Vec<String> = types.iter().map(|ty| ty.to_string()).collect();
  format!("[{}]", names.join(", "))
}

fn main() {
  set_global_logging_threshold(1);

  let mut zoo = Hierarchy::default();
  zoo.add("animal", ["BOTTOM"])
     .add("bird", ["animal"])
     .add("mammal", ["animal"])
     .add("bat", ["bird", "mammal"])
     .add("penguin", ["bird"])
     .add("cat", ["mammal"]);

  println!("{:?}", zoo);

  let animal = Type::from("animal");
  let bird   = Type::from("bird");
  let mammal = Type::from("mammal");

  println!("animal subsumes bird: {}", zoo.subsumes(&animal, &bird));
  println!("lub(bird, mammal) = {}", show(&zoo.least_upper_bounds(&bird, &mammal)));
  println!("glb(bird, mammal) = {}", show(&zoo.greatest_lower_bounds(&bird, &mammal)));
  println!("deterministic: {}", zoo.is_deterministic());

  // A second common descendant of bird and mammal makes the order non-deterministic.
  zoo.add("platypus", ["bird", "mammal"]);
  println!("after adding platypus, deterministic: {}", zoo.is_deterministic());
  if let Some((left, right)) = zoo.get_nondet_pair() {
    println!("  first ambiguous pair: {} and {}", left, right);
  }
  // Logs a warning and folds to TOP.
  println!("njoin(bird, mammal) = {}", zoo.type_join(&[bird.clone(), mammal.clone()]));

  // An operand that claims to sit below every bird.
  let birdlike = Operand::predicate(|operation, other| {
    match (operation, other.as_type()) {
      (Operation::Extends, Some(ty)) if *ty == Type::from("bird") => Some(HookAnswer::Relation(true)),
      _ => None,
    }
  });
  println!("bird subsumes <birdlike>: {}", zoo.resolve_subsumes(&Operand::from(&bird), &birdlike));

  let stratified = zoo.stratasort(&zoo.types());
  for (depth, stratum) in stratified.iter().enumerate() {
    println!("stratum {}: {}", depth, show(stratum));
  }

  let compiled = CompiledHierarchy::new(zoo);
  compiled.compile();
  println!("compiled width: {}", compiled.compiled_width());
  println!("compiled lub(bird, mammal) = {}", show(&compiled.least_upper_bounds(&bird, &mammal)));

  let cached = CachingHierarchy::new(compiled);
  for _ in 0..3 {
    cached.greatest_lower_bounds(&Type::from("bat"), &Type::from("platypus"));
  }
  println!("cache hits: {}, misses: {}", cached.hits(), cached.misses());
}
