// Concrete host values: a free-form hash map and the `host_record!` macro for fixed records

use crate::ast::Expression;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::host_interface::HostValue;
use indexmap::IndexMap;

/// Free-form associative container created by `make-hash-map`.
/// Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMap {
    entries: IndexMap<String, Expression>,
}

impl HostMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HostValue for HostMap {
    fn type_name(&self) -> &str {
        "hash-map"
    }

    fn get(&self, key: &str) -> RuntimeResult<Expression> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| RuntimeError::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn set(&mut self, key: &str, value: Expression) -> RuntimeResult<()> {
        // Only data is stored; code (lists, functions) has no host representation.
        match value {
            Expression::Function(_) => Err(RuntimeError::TypeMismatch {
                field: key.to_string(),
                expected: "atom or host value".to_string(),
                actual: value.type_name().to_string(),
            }),
            Expression::List(ref items) if !items.is_empty() => Err(RuntimeError::TypeMismatch {
                field: key.to_string(),
                expected: "atom or host value".to_string(),
                actual: value.type_name().to_string(),
            }),
            value => {
                self.entries.insert(key.to_string(), value);
                Ok(())
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Implements [`HostValue`] for a plain struct with a fixed set of fields.
///
/// Each field may declare a tag, the external name scripts use for it. Keys
/// are matched against tags first and then against field names.
///
/// ```
/// use glispy::host_record;
///
/// #[derive(Debug, Default)]
/// struct Player {
///     name: String,
///     score: f32,
///     level: u32,
/// }
///
/// host_record!(Player {
///     name: String => "display-name",
///     score: f32 => "score",
///     level: u32,
/// });
/// ```
#[macro_export]
macro_rules! host_record {
    (@tag $key:ident) => {
        false
    };
    (@tag $key:ident, $tag:literal) => {
        $key == $tag
    };
    (@key $field:ident) => {
        stringify!($field)
    };
    (@key $field:ident, $tag:literal) => {
        $tag
    };
    ($record:ident { $($field:ident : $fty:ty $(=> $tag:literal)?),* $(,)? }) => {
        impl $crate::runtime::host_interface::HostValue for $record {
            fn type_name(&self) -> &str {
                stringify!($record)
            }

            fn get(
                &self,
                key: &str,
            ) -> $crate::runtime::error::RuntimeResult<$crate::ast::Expression> {
                $(
                    if $crate::host_record!(@tag key $(, $tag)?) {
                        return Ok(<$fty as $crate::runtime::host_interface::HostConvert>::to_expression(&self.$field));
                    }
                )*
                $(
                    if key == stringify!($field) {
                        return Ok(<$fty as $crate::runtime::host_interface::HostConvert>::to_expression(&self.$field));
                    }
                )*
                Err($crate::runtime::error::RuntimeError::FieldNotFound {
                    field: key.to_string(),
                    record: stringify!($record).to_string(),
                })
            }

            fn set(
                &mut self,
                key: &str,
                value: $crate::ast::Expression,
            ) -> $crate::runtime::error::RuntimeResult<()> {
                $(
                    if $crate::host_record!(@tag key $(, $tag)?) {
                        self.$field = <$fty as $crate::runtime::host_interface::HostConvert>::from_expression(key, &value)?;
                        return Ok(());
                    }
                )*
                $(
                    if key == stringify!($field) {
                        self.$field = <$fty as $crate::runtime::host_interface::HostConvert>::from_expression(key, &value)?;
                        return Ok(());
                    }
                )*
                Err($crate::runtime::error::RuntimeError::FieldNotFound {
                    field: key.to_string(),
                    record: stringify!($record).to_string(),
                })
            }

            fn keys(&self) -> Vec<String> {
                vec![$($crate::host_record!(@key $field $(, $tag)?).to_string()),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::host_interface::HostRef;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Sample {
        a: String,
        b: f32,
        c: String,
        count: i32,
    }

    crate::host_record!(Sample {
        a: String => "a",
        b: f32 => "b",
        c: String,
        count: i32 => "n",
    });

    #[test]
    fn test_map_reports_missing_keys() {
        let mut map = HostMap::new();
        map.set("bar", Expression::Number(1337.0)).unwrap();

        assert_eq!(map.get("bar"), Ok(Expression::Number(1337.0)));
        assert_eq!(
            map.get("baz"),
            Err(RuntimeError::KeyNotFound {
                key: "baz".to_string()
            })
        );
    }

    #[test]
    fn test_map_rejects_code_values() {
        let mut map = HostMap::new();
        let list = Expression::List(vec![Expression::symbol("+"), Expression::Number(1.0)]);
        assert!(matches!(
            map.set("code", list),
            Err(RuntimeError::TypeMismatch { .. })
        ));
        assert!(map.is_empty());
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let mut map = HostMap::new();
        map.set("z", Expression::Number(1.0)).unwrap();
        map.set("a", Expression::Number(2.0)).unwrap();
        map.set("z", Expression::Number(3.0)).unwrap();
        assert_eq!(map.keys(), vec!["z", "a"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_record_resolves_tags_then_field_names() {
        let mut record = Sample::default();
        record.set("a", Expression::string("hello world")).unwrap();
        record.set("b", Expression::Number(1337.0)).unwrap();
        record.set("c", Expression::string("untagged")).unwrap();
        record.set("n", Expression::Number(7.0)).unwrap();
        record.set("count", Expression::Number(8.0)).unwrap();

        assert_eq!(record.a, "hello world");
        assert_eq!(record.b, 1337.0);
        assert_eq!(record.c, "untagged");
        assert_eq!(record.count, 8);
        assert_eq!(record.get("n"), Ok(Expression::Number(8.0)));
        assert_eq!(record.keys(), vec!["a", "b", "c", "n"]);
    }

    #[test]
    fn test_record_unknown_field() {
        let record = Sample::default();
        assert_eq!(
            record.get("missing"),
            Err(RuntimeError::FieldNotFound {
                field: "missing".to_string(),
                record: "Sample".to_string(),
            })
        );
    }

    #[test]
    fn test_shared_record_is_visible_to_host() {
        let shared = Rc::new(RefCell::new(Sample::default()));
        let handle = HostRef::from_shared(shared.clone());
        handle.set("a", Expression::string("from script")).unwrap();
        assert_eq!(shared.borrow().a, "from script");
        assert_eq!(handle.type_name(), "Sample");
    }
}
