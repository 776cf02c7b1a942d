//! Predecessor map and source-to-vertex path reconstruction.

/// Why a path could not be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathError {
    Unreachable,
    Cycle,
}

#[derive(Debug, Clone)]
pub(crate) struct Predecessors {
    pred: Vec<Option<u32>>,
}

impl Predecessors {
    pub(crate) fn new(n: usize) -> Self {
        Self { pred: vec![None; n] }
    }

    #[inline]
    pub(crate) fn get(&self, v: usize) -> Option<usize> {
        self.pred[v].map(|u| u as usize)
    }

    #[inline]
    pub(crate) fn set(&mut self, v: usize, u: usize) {
        self.pred[v] = Some(u as u32);
    }

    /// Vertices that currently have a predecessor, in index order.
    pub(crate) fn assigned(&self) -> impl Iterator<Item = usize> + '_ {
        self.pred.iter().enumerate().filter_map(|(v, p)| p.map(|_| v))
    }

    /// Walks `v -> pred[v] -> ...` back to `source` using an explicit stack and
    /// returns the chain in source-first order. Any walk longer than the vertex
    /// count must revisit a vertex, which is reported as a cycle.
    pub(crate) fn path(&self, source: usize, v: usize) -> Result<Vec<usize>, PathError> {
        let mut stack = vec![v];
        let mut cur = v;
        while cur != source {
            if stack.len() > self.pred.len() {
                return Err(PathError::Cycle);
            }
            cur = self.get(cur).ok_or(PathError::Unreachable)?;
            stack.push(cur);
        }
        let mut out = Vec::with_capacity(stack.len());
        while let Some(x) = stack.pop() {
            out.push(x);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_path_is_singleton() {
        let p = Predecessors::new(3);
        assert_eq!(p.path(1, 1), Ok(vec![1]));
    }

    #[test]
    fn chain_is_source_first() {
        let mut p = Predecessors::new(4);
        p.set(1, 0);
        p.set(2, 1);
        p.set(3, 2);
        assert_eq!(p.path(0, 3), Ok(vec![0, 1, 2, 3]));
        assert_eq!(p.assigned().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_link_is_unreachable() {
        let mut p = Predecessors::new(3);
        p.set(2, 1);
        assert_eq!(p.path(0, 2), Err(PathError::Unreachable));
    }

    #[test]
    fn cycle_is_detected() {
        let mut p = Predecessors::new(4);
        p.set(1, 2);
        p.set(2, 1);
        assert_eq!(p.path(0, 1), Err(PathError::Cycle));
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let n = 200_000;
        let mut p = Predecessors::new(n);
        for v in 1..n {
            p.set(v, v - 1);
        }
        let path = p.path(0, n - 1).unwrap();
        assert_eq!(path.len(), n);
        assert_eq!(path[0], 0);
    }
}
