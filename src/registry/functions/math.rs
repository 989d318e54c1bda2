//! Mathematical functions

use super::number_arg;
use crate::model::{Value, ValueType};
use crate::registry::function::{FunctionError, FunctionResult, TemplateFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

fn binary_sig(name: &'static str) -> FunctionSignature {
    FunctionSignature::new(
        name,
        vec![
            ParameterInfo::required("left", ValueType::Any),
            ParameterInfo::required("right", ValueType::Any),
        ],
        ValueType::Number,
    )
}

fn unary_sig(name: &'static str) -> FunctionSignature {
    FunctionSignature::new(
        name,
        vec![ParameterInfo::required("value", ValueType::Any)],
        ValueType::Number,
    )
}

/// add() function - numeric addition
pub struct AddFunction;

impl TemplateFunction for AddFunction {
    fn name(&self) -> &str {
        "add"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| binary_sig("add"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        Ok(Value::Number(left + right))
    }
}

/// sub() function - numeric subtraction
pub struct SubFunction;

impl TemplateFunction for SubFunction {
    fn name(&self) -> &str {
        "sub"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| binary_sig("sub"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        Ok(Value::Number(left - right))
    }
}

/// mul() function - numeric multiplication
pub struct MulFunction;

impl TemplateFunction for MulFunction {
    fn name(&self) -> &str {
        "mul"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| binary_sig("mul"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        Ok(Value::Number(left * right))
    }
}

/// div() function - numeric division, division by zero is an error
pub struct DivFunction;

impl TemplateFunction for DivFunction {
    fn name(&self) -> &str {
        "div"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| binary_sig("div"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        if right == 0.0 {
            return Err(FunctionError::DivisionByZero {
                name: self.name().to_string(),
            });
        }
        Ok(Value::Number(left / right))
    }
}

/// mod() function - numeric remainder, zero divisor is an error
pub struct ModFunction;

impl TemplateFunction for ModFunction {
    fn name(&self) -> &str {
        "mod"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| binary_sig("mod"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        if right == 0.0 {
            return Err(FunctionError::DivisionByZero {
                name: self.name().to_string(),
            });
        }
        Ok(Value::Number(left % right))
    }
}

/// min() function - smallest of the arguments
pub struct MinFunction;

impl TemplateFunction for MinFunction {
    fn name(&self) -> &str {
        "min"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::variadic(
                "min",
                vec![
                    ParameterInfo::required("first", ValueType::Any),
                    ParameterInfo::required("second", ValueType::Any),
                ],
                ValueType::Number,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let mut best = number_arg(self.name(), 0, args)?;
        for i in 1..args.len() {
            best = best.min(number_arg(self.name(), i, args)?);
        }
        Ok(Value::Number(best))
    }
}

/// max() function - largest of the arguments
pub struct MaxFunction;

impl TemplateFunction for MaxFunction {
    fn name(&self) -> &str {
        "max"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::variadic(
                "max",
                vec![
                    ParameterInfo::required("first", ValueType::Any),
                    ParameterInfo::required("second", ValueType::Any),
                ],
                ValueType::Number,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let mut best = number_arg(self.name(), 0, args)?;
        for i in 1..args.len() {
            best = best.max(number_arg(self.name(), i, args)?);
        }
        Ok(Value::Number(best))
    }
}

/// round() function - nearest integer, halves away from zero
pub struct RoundFunction;

impl TemplateFunction for RoundFunction {
    fn name(&self) -> &str {
        "round"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| unary_sig("round"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Number(number_arg(self.name(), 0, args)?.round()))
    }
}

/// floor() function - rounds down
pub struct FloorFunction;

impl TemplateFunction for FloorFunction {
    fn name(&self) -> &str {
        "floor"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| unary_sig("floor"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Number(number_arg(self.name(), 0, args)?.floor()))
    }
}

/// ceil() function - rounds up
pub struct CeilFunction;

impl TemplateFunction for CeilFunction {
    fn name(&self) -> &str {
        "ceil"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| unary_sig("ceil"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Number(number_arg(self.name(), 0, args)?.ceil()))
    }
}

/// abs() function - absolute value
pub struct AbsFunction;

impl TemplateFunction for AbsFunction {
    fn name(&self) -> &str {
        "abs"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| unary_sig("abs"));
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Number(number_arg(self.name(), 0, args)?.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&AddFunction as &dyn TemplateFunction, 10.0, 4.0, 14.0)]
    #[case(&SubFunction, 10.0, 4.0, 6.0)]
    #[case(&MulFunction, 10.0, 4.0, 40.0)]
    #[case(&DivFunction, 10.0, 4.0, 2.5)]
    #[case(&ModFunction, 10.0, 4.0, 2.0)]
    fn test_binary_math(
        #[case] function: &dyn TemplateFunction,
        #[case] left: f64,
        #[case] right: f64,
        #[case] expected: f64,
    ) {
        let result = function
            .evaluate(&[Value::Number(left), Value::Number(right)])
            .unwrap();
        assert_eq!(result, Value::Number(expected));
    }

    #[test]
    fn test_division_by_zero() {
        let err = DivFunction
            .evaluate(&[Value::Number(1.0), Value::Number(0.0)])
            .unwrap_err();
        assert!(matches!(err, FunctionError::DivisionByZero { .. }));

        let err = ModFunction
            .evaluate(&[Value::Number(1.0), Value::Number(0.0)])
            .unwrap_err();
        assert!(matches!(err, FunctionError::DivisionByZero { .. }));
    }

    #[test]
    fn test_min_max_variadic() {
        let args = [Value::Number(3.0), Value::Number(1.0), Value::Number(2.0)];
        assert_eq!(MinFunction.evaluate(&args).unwrap(), Value::Number(1.0));
        assert_eq!(MaxFunction.evaluate(&args).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(
            RoundFunction.evaluate(&[Value::Number(2.5)]).unwrap(),
            Value::Number(3.0)
        );
        assert_eq!(
            FloorFunction.evaluate(&[Value::Number(2.9)]).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(
            CeilFunction.evaluate(&[Value::Number(2.1)]).unwrap(),
            Value::Number(3.0)
        );
        assert_eq!(
            AbsFunction.evaluate(&[Value::Number(-7.0)]).unwrap(),
            Value::Number(7.0)
        );
    }

    #[test]
    fn test_numeric_strings_coerce() {
        let result = AddFunction
            .evaluate(&[Value::string("2"), Value::string("3.5")])
            .unwrap();
        assert_eq!(result, Value::Number(5.5));
    }

    #[test]
    fn test_null_is_a_type_error() {
        let err = AddFunction
            .evaluate(&[Value::Null, Value::Number(1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            FunctionError::InvalidArgumentType { index: 0, .. }
        ));
    }
}
