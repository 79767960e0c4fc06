//! Recorder units.
//!
//! A recorder unit is the state and accessors generated for one faked
//! method: a stub callback, a mutex, the argument history, the default
//! returns and the per-call returns. Interface fakes emit one unit per
//! method with prefixed names; function fakes emit a single unit with
//! bare names and a `Spy` entry point.

use super::signature::{
    args_struct, forwarded_args, func_type, named_params, named_results, result_fields,
    result_suffix, return_suffix, returns_struct,
};
use crate::method_set::MethodSignature;
use crate::naming::unexport;
use std::collections::HashSet;

/// Identifiers used by one recorder unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderNames {
    pub stub: String,
    pub mutex: String,
    pub args_for_call: String,
    pub returns: String,
    pub returns_on_call: String,
    /// Method carrying the recorded signature.
    pub entry: String,
    /// Prepended to `CallCount`, `Calls`, `ArgsForCall`, `Returns`,
    /// `ReturnsOnCall`.
    pub accessor_prefix: String,
    /// Key in the invocation log.
    pub key: String,
}

impl RecorderNames {
    /// `FetchStub`, `fetchMutex`, ... for interface method `Fetch`.
    pub fn for_method(method: &str) -> Self {
        Self::with_private(method, &unexport(method))
    }

    /// Units for every method of an interface.
    ///
    /// Private field prefixes never repeat and never equal a method name,
    /// so `Fetch` and `fetch` get `fetchMutex` and `fetch2Mutex`.
    pub fn for_methods(methods: &[MethodSignature]) -> Vec<Self> {
        let mut taken: HashSet<String> = methods.iter().map(|m| m.name.clone()).collect();
        methods
            .iter()
            .map(|m| {
                let base = unexport(&m.name);
                let mut private = base.clone();
                let mut n = 2;
                while taken.contains(&private) {
                    private = format!("{}{}", base, n);
                    n += 1;
                }
                taken.insert(private.clone());
                Self::with_private(&m.name, &private)
            })
            .collect()
    }

    fn with_private(method: &str, private: &str) -> Self {
        Self {
            stub: format!("{}Stub", method),
            mutex: format!("{}Mutex", private),
            args_for_call: format!("{}ArgsForCall", private),
            returns: format!("{}Returns", private),
            returns_on_call: format!("{}ReturnsOnCall", private),
            entry: method.to_string(),
            accessor_prefix: method.to_string(),
            key: method.to_string(),
        }
    }

    /// `Stub`, `mutex`, ... and a `Spy` method for function `name`.
    pub fn for_function(name: &str) -> Self {
        Self {
            stub: "Stub".to_string(),
            mutex: "mutex".to_string(),
            args_for_call: "argsForCall".to_string(),
            returns: "returns".to_string(),
            returns_on_call: "returnsOnCall".to_string(),
            entry: "Spy".to_string(),
            accessor_prefix: String::new(),
            key: name.to_string(),
        }
    }

    fn accessor(&self, suffix: &str) -> String {
        format!("{}{}", self.accessor_prefix, suffix)
    }
}

/// Struct fields of one unit, one entry per field.
pub fn fields(names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    let mut out = vec![
        format!("\t{} {}", names.stub, func_type(method)),
        format!("\t{} sync.RWMutex", names.mutex),
        format!(
            "\t{} []{}",
            names.args_for_call,
            args_struct(&method.params, "\t")
        ),
    ];
    if !method.returns.is_empty() {
        out.push(format!(
            "\t{} {}",
            names.returns,
            returns_struct(&method.returns, "\t")
        ));
        out.push(format!(
            "\t{} map[int]{}",
            names.returns_on_call,
            returns_struct(&method.returns, "\t")
        ));
    }
    out
}

/// Fields shared by every fake: the invocation log and its lock.
pub fn invocation_fields() -> Vec<String> {
    vec![
        "\tinvocations map[string][][]interface{}".to_string(),
        "\tinvocationsMutex sync.RWMutex".to_string(),
    ]
}

/// Every method of one unit, separated by blank lines.
pub fn methods(fake: &str, names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    let mut out = entry_method(fake, names, method);
    out.push(String::new());
    out.extend(call_count(fake, names));
    out.push(String::new());
    out.extend(calls(fake, names, method));
    if !method.params.is_empty() {
        out.push(String::new());
        out.extend(args_for_call(fake, names, method));
    }
    if !method.returns.is_empty() {
        out.push(String::new());
        out.extend(returns(fake, names, method));
        out.push(String::new());
        out.extend(returns_on_call(fake, names, method));
    }
    out
}

fn entry_method(fake: &str, names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    let mut out = vec![format!(
        "func (fake *{}) {}({}){} {{",
        fake,
        names.entry,
        named_params(&method.params),
        return_suffix(&method.returns)
    )];

    // Recorded slices are private copies.
    let mut recorded = Vec::with_capacity(method.params.len());
    for p in &method.params {
        if p.is_slice {
            let copy = format!("{}Copy", p.name);
            out.push(format!("\tvar {} {}", copy, p.type_ref));
            out.push(format!("\tif {} != nil {{", p.name));
            out.push(format!(
                "\t\t{} = make({}, len({}))",
                copy, p.type_ref, p.name
            ));
            out.push(format!("\t\tcopy({}, {})", copy, p.name));
            out.push("\t}".to_string());
            recorded.push(copy);
        } else {
            recorded.push(p.name.clone());
        }
    }
    let recorded = recorded.join(", ");
    let has_returns = !method.returns.is_empty();

    out.push(format!("\tfake.{}.Lock()", names.mutex));
    if has_returns {
        out.push(format!(
            "\tret, specificReturn := fake.{}[len(fake.{})]",
            names.returns_on_call, names.args_for_call
        ));
    }
    out.push(format!(
        "\tfake.{args} = append(fake.{args}, {ty}{{{recorded}}})",
        args = names.args_for_call,
        ty = args_struct(&method.params, "\t"),
        recorded = recorded
    ));
    out.push(format!("\tstub := fake.{}", names.stub));
    if has_returns {
        out.push(format!("\tfakeReturns := fake.{}", names.returns));
    }
    out.push(format!("\tfake.{}.Unlock()", names.mutex));
    // Outside the unit lock: Invocations() takes the log lock first.
    out.push(format!(
        "\tfake.recordInvocation(\"{}\", []interface{{}}{{{}}})",
        names.key, recorded
    ));

    let forwarded = forwarded_args(&method.params);
    out.push("\tif stub != nil {".to_string());
    if has_returns {
        out.push(format!("\t\treturn stub({})", forwarded));
        out.push("\t}".to_string());
        out.push("\tif specificReturn {".to_string());
        out.push(format!(
            "\t\treturn {}",
            result_fields(&method.returns, "ret")
        ));
        out.push("\t}".to_string());
        out.push(format!(
            "\treturn {}",
            result_fields(&method.returns, "fakeReturns")
        ));
    } else {
        out.push(format!("\t\tstub({})", forwarded));
        out.push("\t}".to_string());
    }
    out.push("}".to_string());
    out
}

fn call_count(fake: &str, names: &RecorderNames) -> Vec<String> {
    vec![
        format!(
            "func (fake *{}) {}() int {{",
            fake,
            names.accessor("CallCount")
        ),
        format!("\tfake.{}.RLock()", names.mutex),
        format!("\tdefer fake.{}.RUnlock()", names.mutex),
        format!("\treturn len(fake.{})", names.args_for_call),
        "}".to_string(),
    ]
}

fn calls(fake: &str, names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    vec![
        format!(
            "func (fake *{}) {}(stub {}) {{",
            fake,
            names.accessor("Calls"),
            func_type(method)
        ),
        format!("\tfake.{}.Lock()", names.mutex),
        format!("\tdefer fake.{}.Unlock()", names.mutex),
        format!("\tfake.{} = stub", names.stub),
        "}".to_string(),
    ]
}

fn args_for_call(fake: &str, names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    let stored: Vec<String> = method.params.iter().map(|p| p.storage_type()).collect();
    let values: Vec<String> = method
        .params
        .iter()
        .map(|p| format!("argsForCall.{}", p.name))
        .collect();
    vec![
        format!(
            "func (fake *{}) {}(i int){} {{",
            fake,
            names.accessor("ArgsForCall"),
            result_suffix(stored.iter().map(String::as_str))
        ),
        format!("\tfake.{}.RLock()", names.mutex),
        format!("\tdefer fake.{}.RUnlock()", names.mutex),
        format!("\targsForCall := fake.{}[i]", names.args_for_call),
        format!("\treturn {}", values.join(", ")),
        "}".to_string(),
    ]
}

fn returns(fake: &str, names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    let values: Vec<&str> = method.returns.iter().map(|r| r.name.as_str()).collect();
    vec![
        format!(
            "func (fake *{}) {}({}) {{",
            fake,
            names.accessor("Returns"),
            named_results(&method.returns)
        ),
        format!("\tfake.{}.Lock()", names.mutex),
        format!("\tdefer fake.{}.Unlock()", names.mutex),
        format!("\tfake.{} = nil", names.stub),
        format!(
            "\tfake.{} = {}{{{}}}",
            names.returns,
            returns_struct(&method.returns, "\t"),
            values.join(", ")
        ),
        "}".to_string(),
    ]
}

fn returns_on_call(fake: &str, names: &RecorderNames, method: &MethodSignature) -> Vec<String> {
    let values: Vec<&str> = method.returns.iter().map(|r| r.name.as_str()).collect();
    vec![
        format!(
            "func (fake *{}) {}(i int, {}) {{",
            fake,
            names.accessor("ReturnsOnCall"),
            named_results(&method.returns)
        ),
        format!("\tfake.{}.Lock()", names.mutex),
        format!("\tdefer fake.{}.Unlock()", names.mutex),
        format!("\tfake.{} = nil", names.stub),
        format!("\tif fake.{} == nil {{", names.returns_on_call),
        format!(
            "\t\tfake.{} = make(map[int]{})",
            names.returns_on_call,
            returns_struct(&method.returns, "\t\t")
        ),
        "\t}".to_string(),
        format!(
            "\tfake.{}[i] = {}{{{}}}",
            names.returns_on_call,
            returns_struct(&method.returns, "\t"),
            values.join(", ")
        ),
        "}".to_string(),
    ]
}

/// `Invocations()` holds every unit's read lock while copying the log.
pub fn invocations(fake: &str, units: &[RecorderNames]) -> Vec<String> {
    let mut out = vec![
        format!(
            "func (fake *{}) Invocations() map[string][][]interface{{}} {{",
            fake
        ),
        "\tfake.invocationsMutex.RLock()".to_string(),
        "\tdefer fake.invocationsMutex.RUnlock()".to_string(),
    ];
    for unit in units {
        out.push(format!("\tfake.{}.RLock()", unit.mutex));
        out.push(format!("\tdefer fake.{}.RUnlock()", unit.mutex));
    }
    out.extend(
        [
            "\tcopiedInvocations := map[string][][]interface{}{}",
            "\tfor key, value := range fake.invocations {",
            "\t\tcopiedInvocations[key] = value",
            "\t}",
            "\treturn copiedInvocations",
            "}",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    out
}

pub fn record_invocation(fake: &str) -> Vec<String> {
    let mut out = vec![format!(
        "func (fake *{}) recordInvocation(key string, args []interface{{}}) {{",
        fake
    )];
    out.extend(
        [
            "\tfake.invocationsMutex.Lock()",
            "\tdefer fake.invocationsMutex.Unlock()",
            "\tif fake.invocations == nil {",
            "\t\tfake.invocations = map[string][][]interface{}{}",
            "\t}",
            "\tif fake.invocations[key] == nil {",
            "\t\tfake.invocations[key] = [][]interface{}{}",
            "\t}",
            "\tfake.invocations[key] = append(fake.invocations[key], args)",
            "}",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    out
}
