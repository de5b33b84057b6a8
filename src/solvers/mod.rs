pub mod bisection;
