//! Derived values exposed by name, read-only. Getters run on every read so a
//! value always reflects the console's current state.
use serde_json::{json, Map, Value};

use super::Console;
use crate::error::{Error, Result};

pub type Getter = fn(&Console) -> Value;

struct Property {
    name: String,
    getter: Getter,
}

/// Registered properties, plus the names of those meant to be listed
#[derive(Default)]
pub struct ReadOnlyRegistry {
    properties: Vec<Property>,
    listed: Vec<String>,
}

impl ReadOnlyRegistry {
    /// Registers a property once. `enumerable` only controls whether the name
    /// shows up in [`ReadOnlyRegistry::names`].
    pub fn define(&mut self, name: &str, enumerable: bool, getter: Getter) -> Result<()> {
        if self.getter(name).is_some() {
            return Err(Error::AlreadyDefined(name.to_string()));
        }
        self.properties.push(Property { name: name.to_string(), getter });
        if enumerable {
            self.listed.push(name.to_string());
        }
        Ok(())
    }

    pub fn getter(&self, name: &str) -> Option<Getter> {
        self.properties.iter().find(|p| p.name == name).map(|p| p.getter)
    }

    pub fn names(&self) -> &[String] {
        &self.listed
    }
}

impl Console {
    pub fn define_read_only(&mut self, name: &str, enumerable: bool, getter: Getter) -> Result<()> {
        self.properties.define(name, enumerable, getter)
    }

    pub fn property(&self, name: &str) -> Result<Value> {
        match self.properties.getter(name) {
            Some(getter) => Ok(getter(self)),
            None => Err(Error::UnknownProperty(name.to_string())),
        }
    }

    /// Properties can't be assigned. This always fails.
    pub fn set_property(&mut self, name: &str, _value: Value) -> Result<()> {
        match self.properties.getter(name) {
            Some(_) => Err(Error::ReadOnly(name.to_string())),
            None => Err(Error::UnknownProperty(name.to_string())),
        }
    }

    /// Names of the listed read-only properties
    pub fn read_only_properties(&self) -> &[String] {
        self.properties.names()
    }

    /// Listed properties with their current values
    pub fn listed_properties(&self) -> Map<String, Value> {
        self.read_only_properties()
            .iter()
            .filter_map(|name| self.property(name).ok().map(|v| (name.clone(), v)))
            .collect()
    }

    pub(super) fn define_builtin_properties(&mut self) {
        let builtins: [(&str, bool, Getter); 8] = [
            ("stdout", false, |c| json!(c.captured_stdout())),
            ("stderr", false, |c| json!(c.captured_stderr())),
            ("read_only_properties", false, |c| json!(c.read_only_properties())),
            ("running_in_github", true, |c| json!(c.env.running_in_github())),
            ("running_in_devops", true, |c| json!(c.env.running_in_devops())),
            ("debug_mode", true, |c| json!(c.env.debug_mode())),
            ("terminal_can_block", true, |c| json!(c.terminal_can_block())),
            ("console_platform", true, |c| json!(c.env.console_platform())),
        ];

        for (name, enumerable, getter) in builtins {
            // Names are unique and the registry starts out empty
            let _ = self.properties.define(name, enumerable, getter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::*;
    use crate::env::Environment;

    #[test]
    fn test_assignment_fails() {
        let (mut console, _, _) = console(plain_env());

        let err = console.set_property("stdout", json!([])).unwrap_err();
        assert_eq!(err, Error::ReadOnly("stdout".to_string()));
        assert_eq!(err.to_string(), "Property 'stdout' is read-only.");

        assert_eq!(
            console.set_property("nope", json!(1)),
            Err(Error::UnknownProperty("nope".to_string()))
        );
    }

    #[test]
    fn test_reads_reflect_latest_state() {
        let (mut console, _, _) = console(plain_env());
        console.capture_start().unwrap();

        console.print("one");
        assert_eq!(console.property("stdout").unwrap(), json!(["one\n"]));

        console.print("two");
        assert_eq!(console.property("stdout").unwrap(), json!(["one\n", "two\n"]));
        assert_eq!(console.property("stderr").unwrap(), json!([]));

        console.capture_stop(false).unwrap();
    }

    #[test]
    fn test_listed_names() {
        let (console, _, _) = console(plain_env());
        assert_eq!(
            console.read_only_properties(),
            &["running_in_github", "running_in_devops", "debug_mode", "terminal_can_block", "console_platform"]
        );
        assert_eq!(
            console.property("read_only_properties").unwrap(),
            json!(console.read_only_properties())
        );
    }

    #[test]
    fn test_listed_properties() {
        let env = Environment::with_vars([("AGENT_ID", "7"), ("SYSTEM_DEBUG", "true")], "linux");
        let (console, _, _) = console(env);
        let props = console.listed_properties();

        assert_eq!(props["running_in_devops"], json!(true));
        assert_eq!(props["running_in_github"], json!(false));
        assert_eq!(props["debug_mode"], json!(true));
        assert_eq!(props["console_platform"], json!("devops"));
        assert!(!props.contains_key("stdout"));
    }

    #[test]
    fn test_define_custom() {
        let (mut console, _, _) = console(plain_env());
        console.define_read_only("answer", true, |_| json!(42)).unwrap();

        assert_eq!(console.property("answer").unwrap(), json!(42));
        assert_eq!(console.read_only_properties().last().map(String::as_str), Some("answer"));
        assert_eq!(
            console.define_read_only("answer", false, |_| json!(0)),
            Err(Error::AlreadyDefined("answer".to_string()))
        );
    }
}
