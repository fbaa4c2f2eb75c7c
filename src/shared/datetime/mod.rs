pub mod partition_date;

#[cfg(test)]
mod partition_date_test;
