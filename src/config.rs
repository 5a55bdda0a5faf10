use std::str::FromStr;

use serde::Serialize;

/// search driver used to bracket the chromatic number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStrategy {
    /// decide k-colorability for a given k
    KColoring,
    /// try 1,2,3,... colors until the first success
    Greedy,
    /// bisect below an upper bound
    Binary,
    /// exponential probing, then bisection
    Grebin,
    /// single descending search that keeps improving its incumbent
    Exhaustive,
}

/// upper bound computed before the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoundsKind {
    /// no bound (the 64-color cap is used)
    No,
    /// Brooks-style degree bound
    Brooks,
    /// recursive largest first greedy
    Rlf,
    /// Welsh-Powell greedy
    Wp,
}

/// vertex ordering heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortingHeuristic {
    /// increasing vertex number
    Vertex,
    /// decreasing degree
    Degree,
    /// decreasing number of colored neighbors
    Ido,
    /// decreasing saturation (fewest available colors first)
    Dsatur,
    /// decreasing recoloring counter
    Recolor,
    /// decreasing conflict counter
    Conflict,
}

/** full algorithm configuration. Built by the automatic decision tree
from the graph statistics, with optional per-field overrides from the
command line. */
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Config {
    /// search driver
    pub search: SearchStrategy,
    /// upper bound heuristic
    pub bounds: BoundsKind,
    /// vertex ordering
    pub sorting: SortingHeuristic,
    /// re-sort the uncolored suffix every sorting_rate calls (0: never)
    pub sorting_rate: usize,
    /// decay applied to the recolor/conflict counters
    pub decay_factor: f64,
    /// connected-sequence vertex selection
    pub cs: bool,
}

/// optional per-field configuration overrides (command line)
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    /// forced search driver
    pub search: Option<SearchStrategy>,
    /// forced bound heuristic
    pub bounds: Option<BoundsKind>,
    /// forced vertex ordering
    pub sorting: Option<SortingHeuristic>,
    /// forced re-sort cadence
    pub sorting_rate: Option<usize>,
    /// forced decay factor
    pub decay_factor: Option<f64>,
    /// forced connected-sequence flag
    pub cs: Option<bool>,
}

impl Config {
    /** decision tree for automatic algorithm configuration, driven by the
    vertex count, density and balance of the loaded graph (before isolated
    vertices are removed). Overridden fields are taken as given and the
    rest of the tree fills in around them. */
    pub fn decide(n: usize, density: f64, balance: f64, over: &ConfigOverrides) -> Self {
        let search = over.search.unwrap_or({
            if balance > 1.5 && balance <= 1.75 { SearchStrategy::Greedy }
            else { SearchStrategy::Exhaustive }
        });

        let bounds = over.bounds.unwrap_or(match search {
            SearchStrategy::Binary => {
                if      n <= 220 { BoundsKind::Wp }
                else if n <= 290 { BoundsKind::Rlf }
                else             { BoundsKind::Brooks }
            }
            SearchStrategy::Grebin => {
                if      balance <= 1.25 { BoundsKind::Wp }
                else if balance <= 2.25 { BoundsKind::Brooks }
                else                    { BoundsKind::Wp }
            }
            SearchStrategy::Exhaustive => {
                if      n <= 80  { BoundsKind::Rlf }
                else if n <= 290 { BoundsKind::Wp }
                else             { BoundsKind::Brooks }
            }
            _ => BoundsKind::No,
        });

        let sorting = over.sorting.unwrap_or({
            if      n <= 120 { SortingHeuristic::Recolor }
            else if n <= 250 { SortingHeuristic::Dsatur }
            else if n <= 300 { SortingHeuristic::Conflict }
            else             { SortingHeuristic::Dsatur }
        });

        let mut sorting_rate = 0;
        let mut decay_factor = 1.;
        let mut cs = false;
        match sorting {
            SortingHeuristic::Vertex => {
                cs = n <= 40 || n > 400;
            }
            SortingHeuristic::Degree => {
                cs = n <= 100 || n > 200;
            }
            SortingHeuristic::Ido => { // CS implicitly ensured by the ordering
                sorting_rate = if n <= 70 { 0 } else if n <= 270 { 4 } else { 2 };
            }
            SortingHeuristic::Dsatur => { // CS implicitly ensured by the ordering
                sorting_rate = if n <= 50 { 6 } else if n <= 100 { 0 } else { 2 };
            }
            SortingHeuristic::Recolor => {
                decay_factor =
                    if balance <= 2.75 { 0.4 } else if balance <= 3.5 { 0.1 } else { 0.95 };
                if      density <= 0.05 { sorting_rate = 1; cs = false; }
                else if density <= 0.5  { sorting_rate = 2; cs = false; }
                else                    { sorting_rate = 3; cs = true;  }
            }
            SortingHeuristic::Conflict => {
                decay_factor =
                    if n <= 80 { 0.45 } else if n <= 160 { 0.35 } else { 1. };
                if      density <= 0.15 { sorting_rate = 2; cs = false; }
                else if density <= 0.35 { sorting_rate = 5; cs = true;  }
                else                    { sorting_rate = 1; cs = false; }
            }
        }
        if let Some(rate) = over.sorting_rate { sorting_rate = rate; }
        if let Some(decay) = over.decay_factor { decay_factor = decay; }
        if let Some(flag) = over.cs { cs = flag; }

        Self { search, bounds, sorting, sorting_rate, decay_factor, cs }
    }

    /// print the configuration in the usual tabbed format
    pub fn display(&self, k: Option<usize>) {
        println!("\tCONFIGURATIONS:");
        match self.search {
            SearchStrategy::KColoring => println!("\tsearch:   {}-COLORING", k.unwrap_or(0)),
            SearchStrategy::Binary => println!("\tsearch:   BINARY"),
            SearchStrategy::Greedy => println!("\tsearch:   GREEDY"),
            SearchStrategy::Grebin => println!("\tsearch:   GREBIN"),
            SearchStrategy::Exhaustive => println!("\tsearch:   EXHAUSTIVE"),
        }
        match self.bounds {
            BoundsKind::No => println!("\tbounds:   NO"),
            BoundsKind::Brooks => println!("\tbounds:   BROOKS"),
            BoundsKind::Wp => println!("\tbounds:   WP"),
            BoundsKind::Rlf => println!("\tbounds:   RLF"),
        }
        let cs_prefix = if self.cs { "CS " } else { "" };
        match self.sorting {
            SortingHeuristic::Vertex => println!("\tsorting:  {}VERTEX", cs_prefix),
            SortingHeuristic::Degree => println!("\tsorting:  {}DEGREE", cs_prefix),
            SortingHeuristic::Ido => {
                println!("\tsorting:  IDO");
                println!("\tsortrate: {}", self.sorting_rate);
            }
            SortingHeuristic::Dsatur => {
                println!("\tsorting:  DSATUR");
                println!("\tsortrate: {}", self.sorting_rate);
            }
            SortingHeuristic::Recolor => {
                println!("\tsorting:  {}RECOLOR", cs_prefix);
                println!("\tsortrate: {}", self.sorting_rate);
                println!("\trecfac:   {:.2}", self.decay_factor);
            }
            SortingHeuristic::Conflict => {
                println!("\tsorting:  {}CONFLICT", cs_prefix);
                println!("\tsortrate: {}", self.sorting_rate);
                println!("\tconfac:   {:.2}", self.decay_factor);
            }
        }
        println!();
    }
}

impl FromStr for SearchStrategy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KCOLORING" => Ok(Self::KColoring),
            "BINARY" => Ok(Self::Binary),
            "GREEDY" => Ok(Self::Greedy),
            "GREBIN" => Ok(Self::Grebin),
            "EXHAUSTIVE" => Ok(Self::Exhaustive),
            _ => Err(format!("unknown search strategy: {}", s)),
        }
    }
}

impl FromStr for BoundsKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NO" => Ok(Self::No),
            "BROOKS" => Ok(Self::Brooks),
            "RLF" => Ok(Self::Rlf),
            "WP" => Ok(Self::Wp),
            _ => Err(format!("unknown bound: {}", s)),
        }
    }
}

impl FromStr for SortingHeuristic {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VERTEX" => Ok(Self::Vertex),
            "DEGREE" => Ok(Self::Degree),
            "IDO" => Ok(Self::Ido),
            "DSATUR" => Ok(Self::Dsatur),
            "RECOLOR" => Ok(Self::Recolor),
            "CONFLICT" => Ok(Self::Conflict),
            _ => Err(format!("unknown sorting heuristic: {}", s)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_search() {
        let config = Config::decide(100, 0.2, 1.6, &ConfigOverrides::default());
        assert_eq!(config.search, SearchStrategy::Greedy);
        let config2 = Config::decide(100, 0.2, 2.5, &ConfigOverrides::default());
        assert_eq!(config2.search, SearchStrategy::Exhaustive);
        assert_eq!(config2.bounds, BoundsKind::Wp);
    }

    #[test]
    fn test_decide_sorting_branches() {
        // small graph: recolor sorting with a decay picked from the balance
        let config = Config::decide(50, 0.04, 2., &ConfigOverrides::default());
        assert_eq!(config.sorting, SortingHeuristic::Recolor);
        assert!((config.decay_factor - 0.4).abs() < 1e-9);
        assert_eq!(config.sorting_rate, 1);
        assert!(!config.cs);
        // medium graph: dsatur
        let config2 = Config::decide(200, 0.2, 2., &ConfigOverrides::default());
        assert_eq!(config2.sorting, SortingHeuristic::Dsatur);
        assert_eq!(config2.sorting_rate, 2);
    }

    #[test]
    fn test_overrides() {
        let over = ConfigOverrides {
            search: Some(SearchStrategy::Binary),
            sorting: Some(SortingHeuristic::Vertex),
            cs: Some(true),
            ..ConfigOverrides::default()
        };
        let config = Config::decide(100, 0.2, 2., &over);
        assert_eq!(config.search, SearchStrategy::Binary);
        assert_eq!(config.bounds, BoundsKind::Wp); // tree follows the forced search
        assert_eq!(config.sorting, SortingHeuristic::Vertex);
        assert!(config.cs);
        assert_eq!(config.sorting_rate, 0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("grebin".parse::<SearchStrategy>(), Ok(SearchStrategy::Grebin));
        assert_eq!("WP".parse::<BoundsKind>(), Ok(BoundsKind::Wp));
        assert_eq!("dsatur".parse::<SortingHeuristic>(), Ok(SortingHeuristic::Dsatur));
        assert!("nope".parse::<SearchStrategy>().is_err());
    }
}
