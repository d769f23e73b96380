pub mod configuration;
pub mod configurationerror;

pub mod math {
    pub mod integration {
        pub mod batchfunction;
        pub mod integrationerror;
        pub mod integrationoutcome;
        pub mod midpointgrid;
        pub mod midpointintegrator;
    }
}
