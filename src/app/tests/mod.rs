mod deletion_tests;
