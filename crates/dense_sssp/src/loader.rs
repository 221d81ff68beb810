use std::io::Read;

use tracing::debug;

use crate::INF;
use crate::graph::GraphError;
use crate::graph::GraphStore;

/// Errors produced while reading a textual graph description.
///
/// Line numbers are 1-based. Errors detected at end of input carry the
/// number of the last line.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("line {line}: first item in the input should be the number of vertices in the graph")]
    MissingVertexCount { line: usize },

    #[error("line {line}: invalid number of vertices `{token}`")]
    InvalidVertexCount { line: usize, token: String },

    #[error("line {line}: error in input: `{token}` is not a weight")]
    InvalidWeight { line: usize, token: String },

    #[error("line {line}: too many weights (expecting {expected} weights)")]
    TooManyWeights { line: usize, expected: usize },

    #[error(
        "line {line}: {found} weights appear in the input (expected {expected} weights because number of vertices is {vertex_count})"
    )]
    WeightCountMismatch {
        line: usize,
        found: usize,
        expected: usize,
        vertex_count: usize,
    },

    #[error(transparent)]
    Allocation(#[from] GraphError),

    #[error("failed to read graph description: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads the whole of `reader` and parses it with [`parse`].
pub fn read_graph<R: Read>(mut reader: R) -> Result<GraphStore, LoadError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse(&input)
}

/// Parses `n` followed by exactly `n * n` row-major weight tokens.
///
/// A token is a non-negative integer or `*` for an absent edge. Token
/// placement across lines is free.
pub fn parse(input: &str) -> Result<GraphStore, LoadError> {
    let mut tokens = Tokens::new(input);

    let Some((line, token)) = tokens.next() else {
        return Err(LoadError::MissingVertexCount {
            line: tokens.last_line(),
        });
    };
    let vertex_count = match token.parse::<usize>() {
        Ok(n) if n > 0 => n,
        // numeric, but zero or too large for the platform
        _ if token.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(LoadError::InvalidVertexCount {
                line,
                token: token.to_string(),
            });
        }
        _ => return Err(LoadError::MissingVertexCount { line }),
    };

    let expected = vertex_count
        .checked_mul(vertex_count)
        .ok_or(GraphError::TooLarge { vertex_count })?;
    // grows with the input, so a short input never sizes the full matrix
    let mut weights = Vec::new();

    for (line, token) in tokens.by_ref() {
        if weights.len() >= expected {
            return Err(LoadError::TooManyWeights { line, expected });
        }
        let weight = if token == "*" {
            INF
        } else {
            token
                .parse::<u64>()
                .map_err(|_| LoadError::InvalidWeight {
                    line,
                    token: token.to_string(),
                })?
        };
        weights
            .try_reserve(1)
            .map_err(|_| GraphError::TooLarge { vertex_count })?;
        weights.push(weight);
    }

    if weights.len() != expected {
        return Err(LoadError::WeightCountMismatch {
            line: tokens.last_line(),
            found: weights.len(),
            expected,
            vertex_count,
        });
    }

    let graph = GraphStore::from_row_major(vertex_count, weights);
    debug!(
        vertices = vertex_count,
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Whitespace-separated tokens paired with their 1-based line number.
struct Tokens<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    current: Option<(usize, std::str::SplitWhitespace<'a>)>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
            current: None,
            last_line: 1,
        }
    }

    fn last_line(&self) -> usize {
        self.last_line
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((line, words)) = &mut self.current {
                if let Some(token) = words.next() {
                    return Some((*line, token));
                }
            }
            let (idx, text) = self.lines.next()?;
            self.last_line = idx + 1;
            self.current = Some((idx + 1, text.split_whitespace()));
        }
    }
}
