//! Clause and CNF formula types

use std::collections::HashSet;
use std::fmt;

/// A SAT clause: the disjunction of a set of literals.
///
/// Literals are signed variable ids (positive = hazard, negative = safe).
/// They are kept sorted and deduplicated so two clauses with the same
/// literal set compare equal regardless of construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<i32>,
}

impl Clause {
    /// Create a clause from literals; order and duplicates are normalized away
    pub fn new(mut literals: Vec<i32>) -> Self {
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// The empty clause, unsatisfiable by definition
    pub fn empty() -> Self {
        Self { literals: Vec::new() }
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause has exactly one literal
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn contains(&self, literal: i32) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }

    /// Remove a literal in place, keeping sorted order
    pub fn remove(&mut self, literal: i32) {
        if let Ok(idx) = self.literals.binary_search(&literal) {
            self.literals.remove(idx);
        }
    }

    /// A clause is satisfied iff some literal's required polarity matches
    /// the assignment
    pub fn is_satisfied_by<F>(&self, value: F) -> bool
    where
        F: Fn(i32) -> bool,
    {
        self.literals
            .iter()
            .any(|&lit| value(lit.abs()) == (lit > 0))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.literals.iter().map(|l| l.to_string()).collect();
        write!(f, "({})", parts.join(" | "))
    }
}

/// A CNF formula: the conjunction of distinct clauses.
///
/// Duplicate clauses (as literal sets) are collapsed on insertion;
/// first-insertion order is preserved for deterministic solving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CnfFormula {
    clauses: Vec<Clause>,
    seen: HashSet<Clause>,
}

impl CnfFormula {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause, collapsing duplicates
    pub fn add_clause(&mut self, clause: Clause) {
        if self.seen.insert(clause.clone()) {
            self.clauses.push(clause);
        }
    }

    pub fn extend<I: IntoIterator<Item = Clause>>(&mut self, clauses: I) {
        for clause in clauses {
            self.add_clause(clause);
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// The formula is satisfied iff every clause is satisfied
    pub fn is_satisfied_by<F>(&self, value: F) -> bool
    where
        F: Fn(i32) -> bool + Copy,
    {
        self.clauses.iter().all(|c| c.is_satisfied_by(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_normalization() {
        let a = Clause::new(vec![3, -1, 2]);
        let b = Clause::new(vec![2, 3, -1, 2]);
        assert_eq!(a, b);
        assert_eq!(a.literals(), &[-1, 2, 3]);
    }

    #[test]
    fn test_clause_predicates() {
        assert!(Clause::empty().is_empty());
        assert!(Clause::unit(-4).is_unit());
        let clause = Clause::new(vec![1, -2]);
        assert!(clause.contains(-2));
        assert!(!clause.contains(2));
    }

    #[test]
    fn test_clause_remove() {
        let mut clause = Clause::new(vec![1, -2, 3]);
        clause.remove(-2);
        assert_eq!(clause.literals(), &[1, 3]);
        clause.remove(5); // absent literal is a no-op
        assert_eq!(clause.len(), 2);
    }

    #[test]
    fn test_clause_satisfaction() {
        let clause = Clause::new(vec![1, -2]);
        assert!(clause.is_satisfied_by(|_| true)); // literal 1 matches
        assert!(clause.is_satisfied_by(|_| false)); // literal -2 matches
        assert!(!clause.is_satisfied_by(|v| v == 2)); // 1 false, 2 true
        assert!(!Clause::empty().is_satisfied_by(|_| true));
    }

    #[test]
    fn test_formula_dedup() {
        let mut formula = CnfFormula::new();
        formula.add_clause(Clause::new(vec![1, 2]));
        formula.add_clause(Clause::new(vec![2, 1])); // same literal set
        formula.add_clause(Clause::new(vec![-1]));
        assert_eq!(formula.len(), 2);
    }

    #[test]
    fn test_formula_satisfaction() {
        let mut formula = CnfFormula::new();
        formula.add_clause(Clause::new(vec![1, 2]));
        formula.add_clause(Clause::new(vec![-1, 2]));

        assert!(formula.is_satisfied_by(|v| v == 2));
        assert!(!formula.is_satisfied_by(|_| false));
        // Empty formula is trivially satisfied
        assert!(CnfFormula::new().is_satisfied_by(|_| false));
    }
}
