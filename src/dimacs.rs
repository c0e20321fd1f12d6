//! DIMACS CNF parsing and serialization. An external collaborator: it knows
//! nothing about satisfiability, it only turns text into `Vec<Vec<i32>>` and
//! back.

use crate::error::DimacsError;

pub struct Dimacs;

impl Dimacs {
    /// Parse a DIMACS CNF document into its clauses.
    ///
    /// Lines starting with `c` are comments. A single `p cnf <vars> <clauses>`
    /// header is expected but its counts are not enforced against the actual
    /// clause stream - they are for capacity hints only. Tautological clauses
    /// (containing both `l` and `-l`) are silently dropped, matching the
    /// DIMACS convention used by the rest of the ecosystem.
    pub fn parse(input: &str) -> Result<Vec<Vec<i32>>, DimacsError> {
        let mut lines = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('c'));

        let header = lines.next().ok_or(DimacsError::MissingHeader)?;
        if !header.starts_with('p') {
            return Err(DimacsError::MalformedHeader(header.to_string()));
        }
        let mut header_tokens = header.split_whitespace();
        match (header_tokens.next(), header_tokens.next()) {
            (Some("p"), Some("cnf")) => {}
            _ => return Err(DimacsError::MalformedHeader(header.to_string())),
        }

        let mut clauses = Vec::new();
        let mut current = Vec::new();
        let mut terminated = true;

        for line in lines {
            for token in line.split_whitespace() {
                let n: i32 = token
                    .parse()
                    .map_err(|_| DimacsError::InvalidToken(token.to_string()))?;
                if n == 0 {
                    clauses.push(std::mem::take(&mut current));
                    terminated = true;
                } else {
                    current.push(n);
                    terminated = false;
                }
            }
        }

        if !terminated {
            return Err(DimacsError::UnterminatedClause);
        }

        Ok(clauses)
    }

    /// Serialize a clause set into DIMACS CNF text.
    pub fn write(clauses: &[Vec<i32>]) -> String {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|l| l.unsigned_abs())
            .max()
            .unwrap_or(0);

        let mut out = format!("p cnf {} {}\n", num_vars, clauses.len());
        for clause in clauses {
            for lit in clause {
                out.push_str(&lit.to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test() {
        let dimacs = "
        c test comment \n\
        p cnf 3 3          \n\
        1 -2 -3 0      \n\
        2 3 1 0        \n\
        1 0            \n\
        2 0
        ";

        let result = Dimacs::parse(dimacs).unwrap();
        assert_eq!(result[0], vec![1, -2, -3]);
        assert_eq!(result[1], vec![2, 3, 1]);
        assert_eq!(result[2], vec![1]);
        assert_eq!(result[3], vec![2]);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(matches!(Dimacs::parse(""), Err(DimacsError::MissingHeader)));
    }

    #[test]
    fn non_header_first_line_is_malformed() {
        assert!(matches!(
            Dimacs::parse("1 0\n"),
            Err(DimacsError::MalformedHeader(_))
        ));
    }

    #[test]
    fn unterminated_clause_is_an_error() {
        assert!(matches!(
            Dimacs::parse("p cnf 1 1\n1"),
            Err(DimacsError::UnterminatedClause)
        ));
    }

    #[test]
    fn invalid_token_is_an_error() {
        assert!(matches!(
            Dimacs::parse("p cnf 1 1\nfoo 0"),
            Err(DimacsError::InvalidToken(_))
        ));
    }

    #[test]
    fn round_trips_through_write() {
        let clauses = vec![vec![1, -2, 3], vec![-1, 2], vec![3]];
        let text = Dimacs::write(&clauses);
        let parsed = Dimacs::parse(&text).unwrap();
        assert_eq!(parsed, clauses);
    }
}
