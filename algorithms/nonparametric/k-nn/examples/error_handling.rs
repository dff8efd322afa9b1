//! Example demonstrating error handling with the k-NN regressor.
//!
//! Shows the error conditions that can occur when building a regressor and
//! predicting with it, and how they propagate with `?`.

use k_nn::{KnnError, KnnParams, KnnRegressor};
use ml4ms_helpers::{Fit, L2Dist, Predictor, Sample, SampleSet};
use ndarray::array;

fn main() {
    println!("k-NN Regressor Error Handling Examples");
    println!("======================================");

    // Example 1: Handle invalid k value
    println!("\n1. Handling invalid k value (k=0):");
    let training_data = vec![
        Sample::new(array![1.0, 1.0], 0.5),
        Sample::new(array![2.0, 2.0], 1.5),
    ];

    match KnnRegressor::new(0, training_data.clone(), L2Dist) {
        Ok(_) => println!("   Regressor created successfully"),
        Err(KnnError::InvalidK) => println!("   Caught expected error: {}", KnnError::InvalidK),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Example 2: Handle empty training set
    println!("\n2. Handling empty training set:");
    let empty_data: Vec<Sample<f64>> = vec![];

    match KnnRegressor::new(3, empty_data, L2Dist) {
        Ok(regressor) => {
            println!("   Regressor created with empty training set");
            match regressor.predict_one(array![1.0, 1.0].view()) {
                Ok(value) => println!("   Predicted value: {}", value),
                Err(KnnError::EmptyTrainingSet) => {
                    println!("   Caught expected error: {}", KnnError::EmptyTrainingSet)
                }
                Err(e) => println!("   Unexpected error: {}", e),
            }
        }
        Err(e) => println!("   Error creating regressor: {}", e),
    }

    // Example 3: Query with the wrong number of features
    println!("\n3. Handling a query of the wrong dimension:");
    match KnnRegressor::new(1, training_data, L2Dist) {
        Ok(regressor) => match regressor.predict_one(array![1.0].view()) {
            Ok(value) => println!("   Predicted value: {}", value),
            Err(e) => println!("   Caught expected error: {}", e),
        },
        Err(e) => println!("   Failed to create regressor: {}", e),
    }

    // Example 4: Demonstrate error propagation in a function
    println!("\n4. Error propagation in functions:");

    fn regress_with_error_handling() -> Result<f64, KnnError> {
        let data = SampleSet::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.1, 0.9, 2.2, 2.8])?;
        let regressor = KnnParams::new(2, L2Dist).fit(&data)?;
        regressor.predict_one(array![1.4].view())
    }

    match regress_with_error_handling() {
        Ok(value) => println!("   Regression result: {}", value),
        Err(e) => println!("   Regression failed: {}", e),
    }

    println!("\nAll examples completed.");
}
