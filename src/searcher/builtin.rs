//! Built-in operation catalog

use super::definition::{NodeCategory, OperationDefinition, PortDefinition};
use crate::model::DataType;
use egui::Color32;

const MATH_COLOR: Color32 = Color32::from_rgb(45, 55, 65);
const LOGIC_COLOR: Color32 = Color32::from_rgb(65, 45, 65);
const DATA_COLOR: Color32 = Color32::from_rgb(45, 65, 55);
const OUTPUT_COLOR: Color32 = Color32::from_rgb(70, 55, 40);

fn binary_math(name: &str, description: &str, result: &str) -> OperationDefinition {
    OperationDefinition::new(name, name, NodeCategory::math(), description)
        .with_color(MATH_COLOR)
        .with_inputs(vec![
            PortDefinition::new("A", DataType::Float).with_description("First input value"),
            PortDefinition::new("B", DataType::Float).with_description("Second input value"),
        ])
        .with_outputs(vec![PortDefinition::new("Result", DataType::Float).with_description(result)])
        .with_tags(&["math", "arithmetic"])
}

fn binary_logic(name: &str, description: &str) -> OperationDefinition {
    OperationDefinition::new(name, name, NodeCategory::logic(), description)
        .with_color(LOGIC_COLOR)
        .with_inputs(vec![
            PortDefinition::new("A", DataType::Boolean),
            PortDefinition::new("B", DataType::Boolean),
        ])
        .with_outputs(vec![PortDefinition::new("Result", DataType::Boolean)])
        .with_tags(&["logic", "boolean"])
}

/// Every operation the stock searcher offers
pub fn operations() -> Vec<OperationDefinition> {
    vec![
        binary_math("Add", "Adds two numeric values together", "Sum of A and B"),
        binary_math("Subtract", "Subtracts B from A", "Difference of A and B"),
        binary_math("Multiply", "Multiplies two numeric values", "Product of A and B"),
        binary_math("Divide", "Divides A by B", "Quotient of A and B"),
        binary_logic("And", "True when both inputs are true"),
        binary_logic("Or", "True when either input is true"),
        OperationDefinition::new("Not", "Not", NodeCategory::logic(), "Inverts a boolean")
            .with_color(LOGIC_COLOR)
            .with_inputs(vec![PortDefinition::new("Input", DataType::Boolean)])
            .with_outputs(vec![PortDefinition::new("Output", DataType::Boolean)])
            .with_tags(&["logic", "boolean"]),
        OperationDefinition::new("MakeVector3", "Make Vector3", NodeCategory::data(), "Builds a vector from components")
            .with_color(DATA_COLOR)
            .with_inputs(vec![
                PortDefinition::new("X", DataType::Float),
                PortDefinition::new("Y", DataType::Float),
                PortDefinition::new("Z", DataType::Float),
            ])
            .with_outputs(vec![PortDefinition::new("Vector", DataType::Vector3)])
            .with_tags(&["data", "vector"]),
        OperationDefinition::new("SplitVector3", "Split Vector3", NodeCategory::data(), "Splits a vector into components")
            .with_color(DATA_COLOR)
            .with_inputs(vec![PortDefinition::new("Vector", DataType::Vector3)])
            .with_outputs(vec![
                PortDefinition::new("X", DataType::Float),
                PortDefinition::new("Y", DataType::Float),
                PortDefinition::new("Z", DataType::Float),
            ])
            .with_tags(&["data", "vector"]),
        OperationDefinition::new("ToString", "To String", NodeCategory::data(), "Formats any value as text")
            .with_color(DATA_COLOR)
            .with_inputs(vec![PortDefinition::new("Value", DataType::Any)])
            .with_outputs(vec![PortDefinition::new("Text", DataType::String)])
            .with_tags(&["data", "text"]),
        OperationDefinition::new("Print", "Print", NodeCategory::output(), "Prints a value when executed")
            .with_color(OUTPUT_COLOR)
            .with_inputs(vec![
                PortDefinition::new("In", DataType::Execution),
                PortDefinition::new("Value", DataType::Any).with_description("Value to print"),
            ])
            .with_outputs(vec![PortDefinition::new("Out", DataType::Execution)])
            .with_tags(&["output", "console"]),
        OperationDefinition::new("Debug", "Debug", NodeCategory::output(), "Logs a value and passes it through")
            .with_color(OUTPUT_COLOR)
            .with_inputs(vec![PortDefinition::new("Value", DataType::Any)])
            .with_outputs(vec![PortDefinition::new("Value", DataType::Any)])
            .with_tags(&["output", "debug"]),
    ]
}
