pub mod fraudproof;
