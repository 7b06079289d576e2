// ============================================================================
// Pest-based parser for the linear problem text format
// ============================================================================
// Turns the line-oriented representation (direction + objective
// coefficients, then one constraint per line) into a raw `LinearProblem`.
//
// The grammar is defined in grammar.pest.
// ============================================================================

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use optimo_types::{LinearProblem, Matrix, Relation};

use crate::error::ParseError;

// ============================================================================
// Parser Definition
// ============================================================================

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ProblemParser;

// ============================================================================
// Public API
// ============================================================================

/// Parse problem text into a raw `LinearProblem`.
///
/// The result has no augmentation columns, an empty basis, and
/// `rhs[m] = 0`; `original_objective` mirrors the parsed objective.
pub fn parse(input: &str) -> Result<LinearProblem, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut pairs = ProblemParser::parse(Rule::problem, input)
        .map_err(|e| ParseError::Syntax(e.to_string()))?;
    let problem = pairs
        .next()
        .ok_or_else(|| ParseError::Syntax("no problem found".to_string()))?;

    let mut maximize = false;
    let mut objective: Vec<f64> = Vec::new();
    let mut coefficients: Vec<f64> = Vec::new();
    let mut relations: Vec<Relation> = Vec::new();
    let mut rhs: Vec<f64> = Vec::new();

    for item in problem.into_inner() {
        match item.as_rule() {
            Rule::objective => {
                let (is_max, coeffs) = build_objective(item)?;
                maximize = is_max;
                objective = coeffs;
            }
            Rule::constraint => {
                let (coeffs, relation, b) = build_constraint(item, objective.len())?;
                coefficients.extend(coeffs);
                relations.push(relation);
                rhs.push(b);
            }
            Rule::EOI => {}
            _ => {}
        }
    }

    let rows = relations.len();
    let constraints = Matrix::new(rows, objective.len(), coefficients)
        .map_err(|e| ParseError::Syntax(e.to_string()))?;

    LinearProblem::new(maximize, objective, constraints, relations, rhs)
        .map_err(|e| ParseError::Syntax(e.to_string()))
}

// ============================================================================
// Line Builders
// ============================================================================

fn build_objective(pair: Pair<Rule>) -> Result<(bool, Vec<f64>), ParseError> {
    let mut maximize = false;
    let mut coeffs = Vec::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            // leading-token match: a "max" prefix means maximization,
            // any other direction word means minimization
            Rule::direction => maximize = part.as_str().starts_with("max"),
            Rule::number => coeffs.push(parse_number(&part)?),
            _ => {}
        }
    }

    Ok((maximize, coeffs))
}

fn build_constraint(
    pair: Pair<Rule>,
    expected: usize,
) -> Result<(Vec<f64>, Relation, f64), ParseError> {
    let line = pair.as_span().start_pos().line_col().0;
    let mut coeffs = Vec::new();
    let mut relation = None;
    let mut rhs = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::number => {
                let value = parse_number(&part)?;
                if relation.is_none() {
                    coeffs.push(value);
                } else {
                    rhs = Some(value);
                }
            }
            Rule::relation => {
                relation = Some(match part.as_str() {
                    "<=" => Relation::Le,
                    ">=" => Relation::Ge,
                    _ => Relation::Eq,
                });
            }
            _ => {}
        }
    }

    let relation = relation
        .ok_or_else(|| ParseError::Syntax(format!("missing relation on line {}", line)))?;
    let rhs =
        rhs.ok_or_else(|| ParseError::Syntax(format!("missing rhs on line {}", line)))?;
    if coeffs.len() != expected {
        return Err(ParseError::CoefficientCount {
            line,
            expected,
            got: coeffs.len(),
        });
    }

    Ok((coeffs, relation, rhs))
}

fn parse_number(pair: &Pair<Rule>) -> Result<f64, ParseError> {
    pair.as_str().parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        token: pair.as_str().to_string(),
        line: pair.as_span().start_pos().line_col().0,
    })
}
