pub mod ik;
