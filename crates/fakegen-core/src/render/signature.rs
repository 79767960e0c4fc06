//! Spelling normalized signatures in generated code.

use crate::method_set::{MethodSignature, Param, Return};

/// Parameter types only: `string, ...int`.
pub fn param_types(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| p.type_ref.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Named parameters: `arg1 string, arg2 ...int`.
pub fn named_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.name, p.type_ref))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Arguments forwarded to a call, spreading the variadic one: `arg1, arg2...`.
pub fn forwarded_args(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| {
            if p.is_variadic {
                format!("{}...", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `""`, `" T"` or `" (T1, T2)"`, ready to follow a parameter list.
pub fn result_suffix<'a, I>(types: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let types: Vec<&str> = types.into_iter().collect();
    match types.as_slice() {
        [] => String::new(),
        [single] => format!(" {}", single),
        many => format!(" ({})", many.join(", ")),
    }
}

pub fn return_suffix(returns: &[Return]) -> String {
    result_suffix(returns.iter().map(|r| r.type_ref.as_str()))
}

/// Named results for a setter: `result1 string, result2 error`.
pub fn named_results(returns: &[Return]) -> String {
    returns
        .iter()
        .map(|r| format!("{} {}", r.name, r.type_ref))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `func(string, ...int) (bool, error)`
pub fn func_type(method: &MethodSignature) -> String {
    format!(
        "func({}){}",
        param_types(&method.params),
        return_suffix(&method.returns)
    )
}

/// An anonymous struct type with one field per `(name, type)` pair,
/// closing brace indented by `indent`.
pub fn struct_type<'a, I>(fields: I, indent: &str) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut out = String::from("struct {\n");
    for (name, ty) in fields {
        out.push_str(&format!("{}\t{} {}\n", indent, name, ty));
    }
    out.push_str(indent);
    out.push('}');
    out
}

pub fn args_struct(params: &[Param], indent: &str) -> String {
    struct_type(
        params.iter().map(|p| (p.name.as_str(), p.storage_type())),
        indent,
    )
}

pub fn returns_struct(returns: &[Return], indent: &str) -> String {
    struct_type(
        returns.iter().map(|r| (r.name.as_str(), r.type_ref.clone())),
        indent,
    )
}

/// `prefix.result1, prefix.result2`
pub fn result_fields(returns: &[Return], prefix: &str) -> String {
    returns
        .iter()
        .map(|r| format!("{}.{}", prefix, r.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method() -> MethodSignature {
        MethodSignature {
            name: "Put".to_string(),
            params: vec![
                Param {
                    name: "arg1".to_string(),
                    type_ref: "[]byte".to_string(),
                    is_variadic: false,
                    is_slice: true,
                },
                Param {
                    name: "arg2".to_string(),
                    type_ref: "...string".to_string(),
                    is_variadic: true,
                    is_slice: false,
                },
            ],
            returns: vec![
                Return {
                    name: "result1".to_string(),
                    type_ref: "int".to_string(),
                },
                Return {
                    name: "result2".to_string(),
                    type_ref: "error".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_parameter_spellings() {
        let m = method();
        assert_eq!(param_types(&m.params), "[]byte, ...string");
        assert_eq!(named_params(&m.params), "arg1 []byte, arg2 ...string");
        assert_eq!(forwarded_args(&m.params), "arg1, arg2...");
        assert_eq!(func_type(&m), "func([]byte, ...string) (int, error)");
    }

    #[test]
    fn test_result_suffix() {
        assert_eq!(result_suffix(Vec::<&str>::new()), "");
        assert_eq!(result_suffix(vec!["error"]), " error");
        assert_eq!(result_suffix(vec!["int", "error"]), " (int, error)");
    }

    #[test]
    fn test_args_struct_stores_variadic_as_slice() {
        let m = method();
        assert_eq!(
            args_struct(&m.params, "\t"),
            "struct {\n\t\targ1 []byte\n\t\targ2 []string\n\t}"
        );
        assert_eq!(args_struct(&[], ""), "struct {\n}");
        assert_eq!(result_fields(&m.returns, "ret"), "ret.result1, ret.result2");
    }
}
