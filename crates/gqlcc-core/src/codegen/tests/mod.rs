mod artifact_tests;
