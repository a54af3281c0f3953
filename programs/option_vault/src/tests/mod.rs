mod harness;

mod mint;
