use core::fmt::{Debug, Display, Formatter, Result};
use core::hash::Hash;

use crate::precedence::PrecedenceGraph;

/// Diagnostic rendering, one line per transaction in ascending order:
///
/// ```text
/// Source T1 -> [T2, T3]
/// Source T2 has no outgoing edges
/// ```
impl<Txn> Display for PrecedenceGraph<Txn>
where
    Txn: Hash + Eq + Clone + Debug + Ord + Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        for source in self.transactions() {
            let targets = self.graph().sorted_successors(source);
            if targets.is_empty() {
                writeln!(f, "Source {source} has no outgoing edges")?;
                continue;
            }
            write!(f, "Source {source} -> [")?;
            for (i, target) in targets.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{target}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
