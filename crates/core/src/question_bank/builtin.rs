//! Topics and questions shipped with the application.

pub(super) struct SeedQuestion {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct_answer: &'static str,
    pub hint: Option<&'static str>,
}

pub(super) struct SeedTopic {
    pub name: &'static str,
    pub questions: &'static [SeedQuestion],
}

pub(super) const BUILTIN_TOPICS: &[SeedTopic] = &[
    SeedTopic {
        name: "Data Structures & Algorithms",
        questions: &[
            SeedQuestion {
                prompt: "What is the time complexity of binary search?",
                options: &["O(1)", "O(log n)", "O(n)", "O(n log n)"],
                correct_answer: "O(log n)",
                hint: Some("Think about how the search space is divided in each step."),
            },
            SeedQuestion {
                prompt: "Which data structure operates on a LIFO principle?",
                options: &["Queue", "Stack", "Linked List", "Tree"],
                correct_answer: "Stack",
                hint: Some("LIFO stands for Last In, First Out."),
            },
            SeedQuestion {
                prompt: "What is the worst-case time complexity of quicksort?",
                options: &["O(n)", "O(n log n)", "O(n²)", "O(2ⁿ)"],
                correct_answer: "O(n²)",
                hint: Some("Consider what happens when the pivot is always the smallest or largest element."),
            },
            SeedQuestion {
                prompt: "Which of these is not a sorting algorithm?",
                options: &["Bubble Sort", "Merge Sort", "Binary Sort", "Insertion Sort"],
                correct_answer: "Binary Sort",
                hint: Some("Binary Search is an algorithm, but Binary Sort is not a standard sorting algorithm."),
            },
            SeedQuestion {
                prompt: "What data structure would you use for implementing a priority queue?",
                options: &["Array", "Linked List", "Heap", "Hash Table"],
                correct_answer: "Heap",
                hint: Some("This data structure allows efficient access to the element with highest/lowest priority."),
            },
            SeedQuestion {
                prompt: "What is the space complexity of depth-first search (DFS)?",
                options: &["O(1)", "O(log n)", "O(n)", "O(n²)"],
                correct_answer: "O(n)",
                hint: Some("Think about what needs to be stored during the traversal in the worst case."),
            },
            SeedQuestion {
                prompt: "Which algorithm is used to find the shortest path in a weighted graph?",
                options: &[
                    "Breadth-First Search",
                    "Depth-First Search",
                    "Dijkstra's Algorithm",
                    "Binary Search",
                ],
                correct_answer: "Dijkstra's Algorithm",
                hint: Some("This algorithm uses a priority queue to always explore the path with the smallest weight first."),
            },
        ],
    },
    SeedTopic {
        name: "Object-Oriented Programming",
        questions: &[
            SeedQuestion {
                prompt: "Which of the following is not a principle of OOP?",
                options: &["Encapsulation", "Inheritance", "Polymorphism", "Fragmentation"],
                correct_answer: "Fragmentation",
                hint: Some("There are four main principles of OOP: Encapsulation, Inheritance, Polymorphism, and Abstraction."),
            },
            SeedQuestion {
                prompt: "What is the concept of hiding the internal details and showing only the functionality called?",
                options: &["Abstraction", "Encapsulation", "Polymorphism", "Inheritance"],
                correct_answer: "Abstraction",
                hint: Some("This principle focuses on showing only essential features while hiding implementation details."),
            },
            SeedQuestion {
                prompt: "Which OOP concept allows a class to use properties and methods of another class?",
                options: &["Encapsulation", "Abstraction", "Inheritance", "Polymorphism"],
                correct_answer: "Inheritance",
                hint: Some("This concept enables code reuse by allowing a class to inherit from another class."),
            },
            SeedQuestion {
                prompt: "What is it called when a derived class method overrides a base class method?",
                options: &["Overloading", "Overriding", "Hiding", "Extending"],
                correct_answer: "Overriding",
                hint: Some("This allows a subclass to provide a specific implementation of a method already defined in its superclass."),
            },
            SeedQuestion {
                prompt: "Which access modifier makes a class member accessible only within the same class?",
                options: &["Public", "Protected", "Private", "Default"],
                correct_answer: "Private",
                hint: Some("This modifier provides the highest level of encapsulation."),
            },
            SeedQuestion {
                prompt: "What is a constructor in OOP?",
                options: &[
                    "A method that destroys objects",
                    "A special method that is called when an object is created",
                    "A method that copies objects",
                    "A method that converts objects to strings",
                ],
                correct_answer: "A special method that is called when an object is created",
                hint: Some("This method initializes the object's state when it's instantiated."),
            },
            SeedQuestion {
                prompt: "What is the concept of treating an object as an instance of its parent class called?",
                options: &["Inheritance", "Polymorphism", "Encapsulation", "Abstraction"],
                correct_answer: "Polymorphism",
                hint: Some("This allows objects to be treated as instances of their parent class rather than their actual class."),
            },
        ],
    },
    SeedTopic {
        name: "Computer Graphics",
        questions: &[
            SeedQuestion {
                prompt: "Which algorithm is used for line drawing in computer graphics?",
                options: &[
                    "Dijkstra's Algorithm",
                    "Bresenham's Algorithm",
                    "A* Algorithm",
                    "Floyd-Warshall Algorithm",
                ],
                correct_answer: "Bresenham's Algorithm",
                hint: Some("This algorithm determines which pixels should be plotted to form a straight line."),
            },
            SeedQuestion {
                prompt: "What is the process of removing hidden surfaces called?",
                options: &["Rendering", "Shading", "Culling", "Z-buffering"],
                correct_answer: "Z-buffering",
                hint: Some("This technique determines which elements are visible in a 3D scene."),
            },
            SeedQuestion {
                prompt: "Which color model is based on human perception of color?",
                options: &["RGB", "CMYK", "HSL", "YUV"],
                correct_answer: "HSL",
                hint: Some("This model represents colors in terms of Hue, Saturation, and Lightness."),
            },
            SeedQuestion {
                prompt: "What technique is used to smooth jagged edges in computer graphics?",
                options: &["Dithering", "Anti-aliasing", "Texture mapping", "Ray tracing"],
                correct_answer: "Anti-aliasing",
                hint: Some("This technique reduces the jagged appearance of diagonal lines and curves."),
            },
            SeedQuestion {
                prompt: "Which transformation preserves parallel lines but not angles?",
                options: &["Translation", "Rotation", "Scaling", "Shearing"],
                correct_answer: "Shearing",
                hint: Some("This transformation slants the shape of an object."),
            },
            SeedQuestion {
                prompt: "What is the technique of mapping a 2D texture onto a 3D object called?",
                options: &[
                    "Bump mapping",
                    "Texture mapping",
                    "Displacement mapping",
                    "Normal mapping",
                ],
                correct_answer: "Texture mapping",
                hint: Some("This process applies an image to the surface of a 3D model."),
            },
            SeedQuestion {
                prompt: "Which rendering technique simulates the physical behavior of light?",
                options: &["Flat shading", "Gouraud shading", "Phong shading", "Ray tracing"],
                correct_answer: "Ray tracing",
                hint: Some("This technique traces the path of light through pixels in an image plane and simulates the effects of its encounters with virtual objects."),
            },
        ],
    },
    SeedTopic {
        name: "Web Development",
        questions: &[
            SeedQuestion {
                prompt: "Which of the following is not a JavaScript framework or library?",
                options: &["React", "Angular", "Vue", "Django"],
                correct_answer: "Django",
                hint: Some("Three of these are JavaScript technologies, but one is for a different language."),
            },
            SeedQuestion {
                prompt: "What does CSS stand for?",
                options: &[
                    "Computer Style Sheets",
                    "Creative Style Sheets",
                    "Cascading Style Sheets",
                    "Colorful Style Sheets",
                ],
                correct_answer: "Cascading Style Sheets",
                hint: Some("The 'cascading' part refers to how styles can override each other based on specificity."),
            },
            SeedQuestion {
                prompt: "Which HTTP method is used to update a resource?",
                options: &["GET", "POST", "PUT", "DELETE"],
                correct_answer: "PUT",
                hint: Some("This method replaces all current representations of the target resource with the request payload."),
            },
            SeedQuestion {
                prompt: "What is the purpose of localStorage in web browsers?",
                options: &[
                    "To store data with no expiration date",
                    "To store session data",
                    "To cache HTTP requests",
                    "To store cookies",
                ],
                correct_answer: "To store data with no expiration date",
                hint: Some("This storage mechanism persists even after the browser is closed."),
            },
            SeedQuestion {
                prompt: "Which technology is primarily used for creating responsive web designs?",
                options: &["HTML5", "JavaScript", "CSS3", "WebAssembly"],
                correct_answer: "CSS3",
                hint: Some("This technology includes media queries that allow content to adapt to different screen sizes."),
            },
            SeedQuestion {
                prompt: "What is the purpose of a CDN in web development?",
                options: &[
                    "To create dynamic content",
                    "To deliver content from servers closest to the user",
                    "To compress HTML files",
                    "To convert JavaScript to TypeScript",
                ],
                correct_answer: "To deliver content from servers closest to the user",
                hint: Some("CDNs help reduce latency by distributing content across multiple geographic locations."),
            },
            SeedQuestion {
                prompt: "Which of the following is a client-side storage technology?",
                options: &["MySQL", "MongoDB", "IndexedDB", "PostgreSQL"],
                correct_answer: "IndexedDB",
                hint: Some("This is a low-level API for client-side storage of significant amounts of structured data."),
            },
        ],
    },
    SeedTopic {
        name: "Machine Learning",
        questions: &[
            SeedQuestion {
                prompt: "Which algorithm is used for classification problems?",
                options: &[
                    "Linear Regression",
                    "K-Means",
                    "Random Forest",
                    "Principal Component Analysis",
                ],
                correct_answer: "Random Forest",
                hint: Some("This ensemble learning method constructs multiple decision trees during training."),
            },
            SeedQuestion {
                prompt: "What is the purpose of regularization in machine learning?",
                options: &[
                    "To increase model complexity",
                    "To prevent overfitting",
                    "To speed up training",
                    "To visualize data",
                ],
                correct_answer: "To prevent overfitting",
                hint: Some("This technique adds a penalty term to the loss function to discourage complex models."),
            },
            SeedQuestion {
                prompt: "Which of the following is an unsupervised learning algorithm?",
                options: &[
                    "Logistic Regression",
                    "Support Vector Machines",
                    "K-Means Clustering",
                    "Decision Trees",
                ],
                correct_answer: "K-Means Clustering",
                hint: Some("This algorithm groups similar data points together without labeled training data."),
            },
            SeedQuestion {
                prompt: "What does CNN stand for in deep learning?",
                options: &[
                    "Complex Neural Network",
                    "Convolutional Neural Network",
                    "Cascading Neural Network",
                    "Computational Neural Network",
                ],
                correct_answer: "Convolutional Neural Network",
                hint: Some("This type of neural network is commonly used for image processing tasks."),
            },
            SeedQuestion {
                prompt: "Which metric is used to evaluate regression models?",
                options: &["Accuracy", "Precision", "Recall", "Mean Squared Error"],
                correct_answer: "Mean Squared Error",
                hint: Some("This metric measures the average squared difference between predicted and actual values."),
            },
            SeedQuestion {
                prompt: "What is the purpose of the activation function in neural networks?",
                options: &[
                    "To initialize weights",
                    "To introduce non-linearity",
                    "To normalize input data",
                    "To reduce dimensionality",
                ],
                correct_answer: "To introduce non-linearity",
                hint: Some("Without this, a neural network would behave like a linear regression model regardless of depth."),
            },
            SeedQuestion {
                prompt: "Which algorithm is used for dimensionality reduction?",
                options: &[
                    "Random Forest",
                    "Gradient Boosting",
                    "Principal Component Analysis",
                    "Naive Bayes",
                ],
                correct_answer: "Principal Component Analysis",
                hint: Some("This technique transforms the data into a new coordinate system to maximize variance."),
            },
        ],
    },
];
