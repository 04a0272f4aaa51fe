pub mod test_call_scenario;
