use crate::error::{AkernError, AkernResult};

/// Age discretization for the degree-and-age kernel.
///
/// A node born at arrival time `b`, seen at time `t`, sits in age bin
/// `(t - b) / binwidth` with `binwidth = vcount / agebins + 1`. Bins are
/// half-open: the node leaves bin `k - 1` exactly when its age reaches
/// `k * binwidth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeBinning {
    pub agebins: usize,
    pub binwidth: usize,
}

impl AgeBinning {
    pub fn new(vcount: usize, agebins: usize) -> AkernResult<Self> {
        if agebins == 0 {
            return Err(AkernError::BadAgeBins(agebins));
        }
        Ok(Self {
            agebins,
            binwidth: vcount / agebins + 1,
        })
    }

    /// Age bin of a node born at `birth`, observed at time `now`.
    pub fn bin_of(&self, birth: usize, now: usize) -> usize {
        (now - birth) / self.binwidth
    }

    /// Nodes whose age bin advances when time moves from `now` to `now + 1`.
    ///
    /// Yields `(node, entered)` pairs: the node born at `now + 1 - entered *
    /// binwidth` reaches age `entered * binwidth` at the next instant and
    /// slides from bin `entered - 1` into bin `entered`.
    pub fn crossings(&self, now: usize) -> impl Iterator<Item = (usize, usize)> {
        let binwidth = self.binwidth;
        (1..)
            .take_while(move |k| k * binwidth <= now + 1)
            .map(move |k| (now + 1 - k * binwidth, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_bins() {
        assert_eq!(AgeBinning::new(10, 0), Err(AkernError::BadAgeBins(0)));
    }

    #[test]
    fn test_binwidth_formula() {
        assert_eq!(AgeBinning::new(10, 5).unwrap().binwidth, 3);
        assert_eq!(AgeBinning::new(10, 10).unwrap().binwidth, 2);
        // more bins than nodes collapses to one time step per bin
        assert_eq!(AgeBinning::new(5, 10).unwrap().binwidth, 1);
    }

    #[test]
    fn test_bin_boundaries() {
        let binning = AgeBinning { agebins: 4, binwidth: 5 };
        // a node born at time 0 stays in bin 0 through time 4
        for now in 0..5 {
            assert_eq!(binning.bin_of(0, now), 0, "time {now}");
        }
        // and enters bin 1 exactly at time 5
        assert_eq!(binning.bin_of(0, 5), 1);
        assert_eq!(binning.bin_of(0, 9), 1);
        assert_eq!(binning.bin_of(0, 10), 2);
    }

    #[test]
    fn test_crossings() {
        let binning = AgeBinning { agebins: 4, binwidth: 3 };
        // nothing crosses before the first node is binwidth old
        assert_eq!(binning.crossings(0).count(), 0);
        assert_eq!(binning.crossings(1).count(), 0);
        // moving from time 2 to 3: node 0 reaches age 3, enters bin 1
        assert_eq!(binning.crossings(2).collect::<Vec<_>>(), vec![(0, 1)]);
        // moving from time 5 to 6: node 3 enters bin 1, node 0 enters bin 2
        assert_eq!(
            binning.crossings(5).collect::<Vec<_>>(),
            vec![(3, 1), (0, 2)]
        );
    }

    #[test]
    fn test_crossings_agree_with_bin_of() {
        let binning = AgeBinning { agebins: 6, binwidth: 4 };
        for now in 0..40 {
            for (node, entered) in binning.crossings(now) {
                assert_eq!(binning.bin_of(node, now), entered - 1);
                assert_eq!(binning.bin_of(node, now + 1), entered);
            }
        }
    }
}
