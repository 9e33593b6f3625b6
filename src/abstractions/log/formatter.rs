use std::fmt::Debug;

use tracing::field::{Field, Visit};
use tracing_subscriber::{
  field::RecordFields,
  fmt::{
    format::Writer,
    FormatFields
  }
};

/// Writes the message first, then any remaining fields as `name=value`. The `threshold` field is bookkeeping for the
/// filter and is never printed; `critical = true` becomes a `[CRITICAL]` prefix.
pub(crate) struct CustomFieldFormatter;

impl<'writer> FormatFields<'writer> for CustomFieldFormatter {
  fn format_fields<R: RecordFields>(&self, writer: Writer<'writer>, fields: R) -> std::fmt::Result {
    let mut visitor = FieldFilterVisitor { writer, extra: Vec::new() };
    fields.record(&mut visitor);
    visitor.finish()
  }
}

struct FieldFilterVisitor<'writer> {
  writer: Writer<'writer>,
  /// Fields other than the message, buffered so that they print after it regardless of recording order.
  extra : Vec<String>,
}

impl FieldFilterVisitor<'_> {
  fn finish(mut self) -> std::fmt::Result {
    for field in self.extra.drain(..) {
      write!(self.writer, " {}", field)?;
    }
    Ok(())
  }
}

impl Visit for FieldFilterVisitor<'_> {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() != "threshold" {
      self.extra.push(format!("{}={}", field.name(), value));
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() != "threshold" {
      self.extra.push(format!("{}={}", field.name(), value));
    }
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    match field.name() {
      "critical" => {
        if value {
          let _ = write!(self.writer, "[CRITICAL] ");
        }
      }
      name => self.extra.push(format!("{}={}", name, value)),
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
    match field.name() {
      "message"   => { let _ = write!(self.writer, "{:?}", value); }
      "threshold" => {}
      name        => self.extra.push(format!("{}={:?}", name, value)),
    }
  }
}
