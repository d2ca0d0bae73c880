//! Run-length encoding of strand timelines.
//!
//! A strand is a per-base list of replication ticks. Fork movement makes
//! two patterns dominate: stretches replicated in the same tick, and
//! staircases of equal-sized stretches whose tick steps by one as a fork
//! sweeps along. Both compress: `valuexLEN` for a run, `first-lastxLEN`
//! for a staircase (the `xLEN` suffix is dropped when the run length is
//! one). Unreplicated bases encode as value `-1`. One entry per line.

/// Collapses the strand into `(value, run_length)` pairs, mapping
/// unreplicated cells to -1.
fn runs(strand: &[Option<u32>]) -> Vec<(i64, usize)> {
    let mut runs: Vec<(i64, usize)> = Vec::new();
    for cell in strand {
        let value = cell.map(i64::from).unwrap_or(-1);
        match runs.last_mut() {
            Some((last, length)) if *last == value => *length += 1,
            _ => runs.push((value, 1)),
        }
    }
    runs
}

fn entry(first: i64, last: i64, run_length: usize) -> String {
    let mut out = first.to_string();
    if last != first {
        out.push('-');
        out.push_str(&last.to_string());
    }
    if run_length != 1 {
        out.push('x');
        out.push_str(&run_length.to_string());
    }
    out
}

/// Encodes a strand timeline into its run-length textual form.
pub fn encode_strand(strand: &[Option<u32>]) -> String {
    let runs = runs(strand);
    let mut lines = Vec::new();

    let mut i = 0;
    while i < runs.len() {
        let (value, run_length) = runs[i];

        // Extend into a staircase while run lengths match and values keep
        // stepping by the same +/-1.
        let mut j = i;
        if j + 1 < runs.len() && runs[j + 1].1 == run_length && (runs[j + 1].0 - value).abs() == 1
        {
            let step = runs[j + 1].0 - value;
            j += 1;
            while j + 1 < runs.len()
                && runs[j + 1].1 == run_length
                && runs[j + 1].0 - runs[j].0 == step
            {
                j += 1;
            }
        }

        lines.push(entry(value, runs[j].0, run_length));
        i = j + 1;
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_strand_encodes_to_nothing() {
        assert_eq!(encode_strand(&[]), "");
    }

    #[test]
    fn an_unreplicated_strand_is_one_negative_run() {
        assert_eq!(encode_strand(&[None; 5]), "-1x5\n");
    }

    #[test]
    fn a_single_base_has_no_length_suffix() {
        assert_eq!(encode_strand(&[Some(3)]), "3\n");
    }

    #[test]
    fn equal_values_collapse_into_a_run() {
        let strand = vec![Some(4), Some(4), Some(4)];
        assert_eq!(encode_strand(&strand), "4x3\n");
    }

    #[test]
    fn stepping_runs_collapse_into_a_staircase() {
        let strand = vec![Some(5), Some(5), Some(6), Some(6), Some(7), Some(7)];
        assert_eq!(encode_strand(&strand), "5-7x2\n");
    }

    #[test]
    fn descending_single_steps_form_a_staircase_without_suffix() {
        let strand = vec![Some(9), Some(8), Some(7)];
        assert_eq!(encode_strand(&strand), "9-7\n");
    }

    #[test]
    fn non_unit_steps_do_not_chain() {
        let strand = vec![Some(5), Some(7), Some(9)];
        assert_eq!(encode_strand(&strand), "5\n7\n9\n");
    }

    #[test]
    fn a_length_change_breaks_the_staircase() {
        let strand = vec![Some(2), Some(2), Some(3), Some(3), Some(4), Some(4), Some(4)];
        assert_eq!(encode_strand(&strand), "2-3x2\n4x3\n");
    }

    #[test]
    fn mixed_timelines_encode_piecewise() {
        let strand = vec![
            None,
            None,
            Some(1),
            Some(2),
            Some(3),
            Some(3),
            None,
        ];
        assert_eq!(encode_strand(&strand), "-1x2\n1-2\n3x2\n-1\n");
    }
}
